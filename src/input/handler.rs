use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::AppState;

pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Backspace,
    /// Bracketed paste into the focused editor
    Paste(String),
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) => handle_key(key_event, state, bindings),
        Event::Paste(text) if !state.modal.is_active() && state.focus.is_editor() => {
            InputResult::Paste(text)
        }
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    if state.modal.is_help() {
        return handle_help_input(key, bindings);
    }

    if let Some(action) = bindings.get(&key) {
        if action == Action::Quit {
            return InputResult::Quit;
        }
        return InputResult::Action(action);
    }

    if state.focus.is_selector() {
        return handle_selector_input(key);
    }

    handle_text_input(key)
}

fn handle_help_input(key: KeyEvent, bindings: &KeyBindings) -> InputResult {
    // In help modal: Up/Down or j/k scroll, Esc/F1/q closes, quit still quits
    if let Some(action) = bindings.get(&key) {
        match action {
            Action::Quit => return InputResult::Quit,
            Action::Help | Action::Back => return InputResult::Action(Action::Help),
            Action::Up | Action::Down => return InputResult::Action(action),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('q') => InputResult::Action(Action::Help),
        KeyCode::Char('k') => InputResult::Action(Action::Up),
        KeyCode::Char('j') => InputResult::Action(Action::Down),
        _ => InputResult::Continue,
    }
}

fn handle_selector_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char('k') => InputResult::Action(Action::Up),
        KeyCode::Char('j') => InputResult::Action(Action::Down),
        KeyCode::Enter => InputResult::Action(Action::NextPane),
        _ => InputResult::Continue,
    }
}

fn handle_text_input(key: KeyEvent) -> InputResult {
    // Ctrl/Alt combinations that are not bound must not insert text
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return InputResult::Continue;
    }

    match key.code {
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Enter => InputResult::Char('\n'),
        _ => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{Focus, ModalState};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn state_with_focus(focus: Focus) -> AppState {
        AppState {
            focus,
            ..Default::default()
        }
    }

    #[test]
    fn test_quit_action() {
        let bindings = KeyBindings::new();
        let state = AppState::default();

        let result = handle_input(
            press(KeyCode::Char('q'), KeyModifiers::CONTROL),
            &state,
            &bindings,
        );
        assert!(matches!(result, InputResult::Quit));
    }

    #[test]
    fn test_typing_in_editor() {
        let bindings = KeyBindings::new();
        let state = state_with_focus(Focus::Email);

        let result = handle_input(press(KeyCode::Char('q'), KeyModifiers::NONE), &state, &bindings);
        assert!(matches!(result, InputResult::Char('q')));

        let result = handle_input(
            press(KeyCode::Char('Q'), KeyModifiers::SHIFT),
            &state,
            &bindings,
        );
        assert!(matches!(result, InputResult::Char('Q')));

        let result = handle_input(press(KeyCode::Enter, KeyModifiers::NONE), &state, &bindings);
        assert!(matches!(result, InputResult::Char('\n')));

        let result = handle_input(
            press(KeyCode::Char('x'), KeyModifiers::CONTROL),
            &state,
            &bindings,
        );
        assert!(matches!(result, InputResult::Continue));
    }

    #[test]
    fn test_selector_navigation() {
        let bindings = KeyBindings::new();
        let state = state_with_focus(Focus::Style);

        let result = handle_input(press(KeyCode::Char('j'), KeyModifiers::NONE), &state, &bindings);
        assert!(matches!(result, InputResult::Action(Action::Down)));

        let result = handle_input(press(KeyCode::Up, KeyModifiers::NONE), &state, &bindings);
        assert!(matches!(result, InputResult::Action(Action::Up)));

        let result = handle_input(press(KeyCode::Char('a'), KeyModifiers::NONE), &state, &bindings);
        assert!(matches!(result, InputResult::Continue));
    }

    #[test]
    fn test_generate_works_from_any_pane() {
        let bindings = KeyBindings::new();
        for focus in [Focus::Model, Focus::Style, Focus::Email, Focus::Response] {
            let state = state_with_focus(focus);
            let result = handle_input(
                press(KeyCode::Char('g'), KeyModifiers::CONTROL),
                &state,
                &bindings,
            );
            assert!(matches!(result, InputResult::Action(Action::Generate)));
        }
    }

    #[test]
    fn test_paste_only_reaches_editors() {
        let bindings = KeyBindings::new();

        let state = state_with_focus(Focus::Email);
        let result = handle_input(Event::Paste("Hi\nthere".to_string()), &state, &bindings);
        assert!(matches!(result, InputResult::Paste(ref s) if s == "Hi\nthere"));

        let state = state_with_focus(Focus::Model);
        let result = handle_input(Event::Paste("Hi".to_string()), &state, &bindings);
        assert!(matches!(result, InputResult::Continue));
    }

    #[test]
    fn test_help_modal_captures_keys() {
        let bindings = KeyBindings::new();
        let mut state = state_with_focus(Focus::Email);
        state.modal = ModalState::Help {
            keybindings: bindings.all_bindings(),
            scroll: 0,
        };

        let result = handle_input(press(KeyCode::Char('a'), KeyModifiers::NONE), &state, &bindings);
        assert!(matches!(result, InputResult::Continue));

        let result = handle_input(press(KeyCode::Esc, KeyModifiers::NONE), &state, &bindings);
        assert!(matches!(result, InputResult::Action(Action::Help)));

        let result = handle_input(Event::Paste("x".to_string()), &state, &bindings);
        assert!(matches!(result, InputResult::Continue));
    }
}
