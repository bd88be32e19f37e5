//! Keyboard input dispatch: overlays, then global keys, then form editing.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay == Overlay::Help {
        if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
            app.overlay = Overlay::None;
        }
        return;
    }

    // 2. Global keys.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => app.running = false,
            KeyCode::Char('r') => app.remount(),
            KeyCode::Char('u') => app.clear_field(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::F(1) => app.overlay = Overlay::Help,
        KeyCode::Esc => {
            if app.form.panel().visible {
                app.dismiss_result();
            }
        }
        KeyCode::Tab | KeyCode::Down => app.focus = app.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.focus = app.focus.prev(),
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Focus;
    use crate::worker::WorkerCommand;
    use maxprofit_core::FieldId;
    use std::sync::mpsc;

    fn app() -> (AppState, mpsc::Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(cmd_tx, resp_rx, "http://localhost:5000".into()), cmd_rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn release_events_are_ignored() {
        let (mut app, _rx) = app();
        let mut key = press(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert_eq!(app.form.state().stock, "");
    }

    #[test]
    fn q_is_typed_not_quit() {
        let (mut app, _rx) = app();
        type_str(&mut app, "QQQ");
        assert!(app.running);
        assert_eq!(app.form.state().stock, "QQQ");
        handle_key(&mut app, ctrl('q'));
        assert!(!app.running);
    }

    #[test]
    fn tab_walks_the_form() {
        let (mut app, _rx) = app();
        type_str(&mut app, "UBER");
        handle_key(&mut app, press(KeyCode::Tab));
        type_str(&mut app, "2023-11-16T10:30");
        handle_key(&mut app, press(KeyCode::Tab));
        type_str(&mut app, "2023-12-16T10:30");
        handle_key(&mut app, press(KeyCode::Tab));
        type_str(&mut app, "100.5");
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Submit);

        let state = app.form.state();
        assert_eq!(state.begin_point, "2023-11-16T10:30");
        assert_eq!(state.end_point, "2023-12-16T10:30");
        assert_eq!(state.amount, "100.5");
        assert!(state.is_valid());
    }

    #[test]
    fn enter_submits_and_esc_closes_result() {
        let (mut app, rx) = app();
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(rx.try_recv().is_err());
        assert!(app.form.state().feedback(FieldId::Stock).is_some());

        app.form.on_field_change("stock", "UBER");
        app.form.on_field_change("begin", "2023-11-16T10:30");
        app.form.on_field_change("end", "2023-12-16T10:30");
        app.form.on_field_change("amount", "100");
        handle_key(&mut app, press(KeyCode::Enter));
        let Ok(WorkerCommand::Fetch(sub)) = rx.try_recv() else {
            panic!("expected Fetch");
        };

        app.form
            .on_reply(&sub, Err(maxprofit_core::FetchError::Transport("down".into())));
        assert!(app.form.panel().visible);
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.form.panel().visible);
    }

    #[test]
    fn ctrl_r_resets_and_ctrl_u_clears() {
        let (mut app, _rx) = app();
        type_str(&mut app, "UBER");
        handle_key(&mut app, ctrl('u'));
        assert_eq!(app.form.state().stock, "");

        type_str(&mut app, "UBER");
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, ctrl('r'));
        assert_eq!(app.form.state().stock, "");
        assert_eq!(app.focus, Focus::Field(FieldId::Stock));
        assert_eq!(app.form.generation(), 1);
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let (mut app, _rx) = app();
        handle_key(&mut app, press(KeyCode::F(1)));
        assert_eq!(app.overlay, Overlay::Help);
        type_str(&mut app, "abc");
        assert_eq!(app.form.state().stock, "");
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }
}
