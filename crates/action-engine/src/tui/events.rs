/*
[INPUT]:  Crossterm key events
[OUTPUT]: AppState mutations routed by focus (input box vs task list)
[POS]:    TUI key handling
[UPDATE]: When changing keybindings
*/

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{AppState, Focus};

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
    if ctrl_c || key.code == KeyCode::Esc {
        return true;
    }

    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::List => handle_list_key(app, key),
    }
}

fn handle_input_key(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => {
            app.controller.pop_input();
        }
        KeyCode::Tab | KeyCode::Down => app.focus_list(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.controller.push_input(ch);
        }
        _ => {}
    }
    false
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::Char('e') | KeyCode::Enter => app.execute_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('i') | KeyCode::Tab | KeyCode::BackTab => app.focus_input(),
        KeyCode::Char('l') => app.toggle_logs(),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    use action_engine::logging::LogBuffer;
    use action_engine::{TaskListController, TaskStatus};

    fn app() -> AppState {
        AppState::new(TaskListController::new(), LogBuffer::shared(16), false)
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_and_enter_adds_task() {
        let mut app = app();
        type_text(&mut app, "Write reportx");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.input(), "Write report");

        assert!(!press(&mut app, KeyCode::Enter));
        assert_eq!(app.controller.len(), 1);
        assert_eq!(app.controller.tasks()[0].text(), "Write report");
        assert_eq!(app.controller.input(), "");
    }

    #[test]
    fn letters_in_input_focus_do_not_trigger_list_actions() {
        let mut app = app();
        type_text(&mut app, "qed");
        assert_eq!(app.controller.input(), "qed");
        assert!(app.controller.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn list_focus_executes_and_deletes_selected() {
        let mut app = app();
        type_text(&mut app, "A");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "B");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::List);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.controller.tasks()[0].status(), TaskStatus::Executing);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.controller.len(), 1);
        assert_eq!(app.controller.tasks()[0].text(), "A");

        press(&mut app, KeyCode::Char('l'));
        assert!(app.show_logs);

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Esc));
        assert!(handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
        assert!(!press(&mut app, KeyCode::Char('q')));

        app.focus_list();
        assert!(press(&mut app, KeyCode::Char('q')));
    }
}
