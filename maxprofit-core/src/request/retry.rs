//! Bounded exponential backoff.
//!
//! The policy is a pure mapping from retry number to delay; the wrapper runs
//! an operation under it and sleeps through an injectable [`Sleeper`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retry schedule for transient failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each later one.
    pub base_delay: Duration,
    /// Response statuses worth another attempt.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            retryable_statuses: vec![429, 500, 503],
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): 1s, 2s, 4s, ...
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }
}

/// Something that can wait.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, delay: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Emitted before each backoff wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryNotice {
    /// Retry about to be made (1-based).
    pub attempt: u32,
    pub delay: Duration,
    pub cause: String,
}

/// Run `op` until it succeeds, is not worth retrying, or the policy runs out.
///
/// `retry_cause` returns why a result should be retried, or `None` to stop.
/// When retries are exhausted the last result is returned as-is.
pub fn retry_with_backoff<T, E>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut op: impl FnMut(u32) -> Result<T, E>,
    mut retry_cause: impl FnMut(&Result<T, E>) -> Option<String>,
    mut on_retry: impl FnMut(&RetryNotice),
) -> Result<T, E> {
    let mut attempt = 0;
    loop {
        let result = op(attempt);
        if attempt >= policy.max_retries {
            return result;
        }
        let Some(cause) = retry_cause(&result) else {
            return result;
        };
        attempt += 1;
        let notice = RetryNotice {
            attempt,
            delay: policy.delay_for(attempt),
            cause,
        };
        on_retry(&notice);
        sleeper.sleep(notice.delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSleeper(Mutex<Vec<Duration>>);

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, delay: Duration) {
            self.0.lock().unwrap().push(delay);
        }
    }

    fn transient(r: &Result<u32, String>) -> Option<String> {
        r.as_ref().err().cloned()
    }

    #[test]
    fn default_schedule_is_one_two_four() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
    }

    #[test]
    fn retryable_statuses() {
        let policy = RetryPolicy::default();
        for status in [429, 500, 503] {
            assert!(policy.is_retryable_status(status));
        }
        for status in [200, 400, 404, 502] {
            assert!(!policy.is_retryable_status(status));
        }
    }

    #[test]
    fn huge_retry_numbers_saturate() {
        let policy = RetryPolicy::default();
        assert!(policy.delay_for(200) >= policy.delay_for(31));
    }

    #[test]
    fn success_first_time_never_sleeps() {
        let sleeper = RecordingSleeper::default();
        let result = retry_with_backoff(
            &RetryPolicy::default(),
            &sleeper,
            |_| Ok::<u32, String>(7),
            transient,
            |_| {},
        );
        assert_eq!(result, Ok(7));
        assert!(sleeper.0.lock().unwrap().is_empty());
    }

    #[test]
    fn recovers_after_transient_failures() {
        let sleeper = RecordingSleeper::default();
        let mut notices = Vec::new();
        let result = retry_with_backoff(
            &RetryPolicy::default(),
            &sleeper,
            |attempt| if attempt < 2 { Err(format!("fail {attempt}")) } else { Ok(attempt) },
            transient,
            |n| notices.push(n.clone()),
        );
        assert_eq!(result, Ok(2));
        assert_eq!(
            *sleeper.0.lock().unwrap(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].cause, "fail 0");
        assert_eq!(notices[1].attempt, 2);
    }

    #[test]
    fn exhaustion_returns_last_failure() {
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let result = retry_with_backoff(
            &RetryPolicy::default(),
            &sleeper,
            |attempt| {
                calls += 1;
                Err::<u32, String>(format!("fail {attempt}"))
            },
            transient,
            |_| {},
        );
        assert_eq!(result, Err("fail 3".to_string()));
        assert_eq!(calls, 4);
        assert_eq!(sleeper.0.lock().unwrap().len(), 3);
    }

    #[test]
    fn non_retryable_result_stops_immediately() {
        let sleeper = RecordingSleeper::default();
        let result = retry_with_backoff(
            &RetryPolicy::default(),
            &sleeper,
            |_| Err::<u32, String>("fatal".into()),
            |_| None,
            |_| {},
        );
        assert_eq!(result, Err("fatal".to_string()));
        assert!(sleeper.0.lock().unwrap().is_empty());
    }
}
