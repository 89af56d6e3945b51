mod components;
mod drafter;
mod help;
mod status_bar;
pub mod theme;
mod widgets;

use ratatui::Frame;

pub use drafter::response_scroll_limit;

use crate::app::state::{AppState, ModalState};

pub fn render(frame: &mut Frame, state: &AppState) {
    drafter::render_drafter(frame, state);

    // Help popup (rendered last so it appears on top)
    if let ModalState::Help {
        ref keybindings,
        scroll,
    } = state.modal
    {
        help::render_help_popup(frame, frame.area(), keybindings, scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyBindings;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_catalogs_and_response() {
        let mut state = AppState::new(0, 0);
        state.session.email = "Can we meet Friday?".to_string();
        state
            .session
            .set_result(&Ok("Friday works for me.".to_string()), "DeepSeek V3");

        let screen = draw(&state, 120, 40);
        assert!(screen.contains("Amazon Bedrock Titan"));
        assert!(screen.contains("Empathetic"));
        assert!(screen.contains("Can we meet Friday?"));
        assert!(screen.contains("Friday works for me."));
    }

    #[test]
    fn test_render_narrow_terminal_and_help_overlay() {
        let mut state = AppState::new(0, 0);
        state.modal = ModalState::Help {
            keybindings: KeyBindings::new().all_bindings(),
            scroll: 0,
        };

        let screen = draw(&state, 60, 30);
        assert!(screen.contains("Help"));
        assert!(screen.contains("Ctrl+G"));

        // Smaller than the popup minimum must not panic
        draw(&state, 20, 6);
    }
}
