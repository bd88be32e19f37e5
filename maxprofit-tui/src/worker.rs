//! Background worker thread. Max-profit requests run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Backoff
//! sleeps block this thread, never the render loop.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use maxprofit_core::form::Submission;
use maxprofit_core::request::{FetchError, ProfitClient, RetryNotice, Sleeper, Transport};
use maxprofit_core::response::Reply;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Fetch(Submission),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Retrying {
        submission: Submission,
        notice: RetryNotice,
    },
    Completed {
        submission: Submission,
        result: Result<Reply, FetchError>,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker<T, S>(
    client: ProfitClient<T, S>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>>
where
    T: Transport + 'static,
    S: Sleeper + 'static,
{
    thread::Builder::new()
        .name("maxprofit-worker".into())
        .spawn(move || worker_loop(client, rx, tx))
}

fn worker_loop<T: Transport, S: Sleeper>(
    client: ProfitClient<T, S>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Fetch(submission)) => {
                let result = client.request(&submission.query, |notice| {
                    let _ = tx.send(WorkerResponse::Retrying {
                        submission: submission.clone(),
                        notice: notice.clone(),
                    });
                });
                if tx
                    .send(WorkerResponse::Completed { submission, result })
                    .is_err()
                {
                    break;
                }
            }
        }
    }
    tracing::debug!("request worker stopped");
}
