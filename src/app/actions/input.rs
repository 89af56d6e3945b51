//! Text input handling (chars, backspace, paste)

use crate::app::state::Focus;

use super::super::App;

impl App {
    /// Buffer the focused editor writes to, if any
    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.state.focus {
            Focus::Email => Some(&mut self.state.session.email),
            Focus::Response => self.state.session.response.as_mut().map(|r| &mut r.text),
            Focus::Model | Focus::Style => None,
        }
    }

    pub(crate) fn handle_char(&mut self, c: char) {
        if let Some(buffer) = self.focused_buffer() {
            buffer.push(c);
        }
        self.after_edit();
    }

    pub(crate) fn handle_backspace(&mut self) {
        if let Some(buffer) = self.focused_buffer() {
            buffer.pop();
        }
        self.after_edit();
    }

    pub(crate) fn handle_paste(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        if let Some(buffer) = self.focused_buffer() {
            buffer.push_str(&normalized);
        }
        self.after_edit();
    }

    /// The response cursor sits at the end of the text
    fn after_edit(&mut self) {
        if self.state.focus == Focus::Response {
            self.follow_response_tail();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::app::state::Focus;

    #[tokio::test]
    async fn test_typing_goes_to_focused_editor() {
        let mut app = App::for_tests();
        app.state.focus = Focus::Email;

        for c in "Hi Bob".chars() {
            app.handle_char(c);
        }
        app.handle_char('\n');
        app.handle_backspace();
        app.handle_backspace();
        assert_eq!(app.state.session.email, "Hi Bo");

        app.state.focus = Focus::Model;
        app.handle_char('x');
        assert_eq!(app.state.session.email, "Hi Bo");
    }

    #[tokio::test]
    async fn test_paste_normalizes_line_endings() {
        let mut app = App::for_tests();
        app.state.focus = Focus::Email;

        app.handle_paste("Line one\r\nLine two\rLine three");
        assert_eq!(app.state.session.email, "Line one\nLine two\nLine three");
    }

    #[tokio::test]
    async fn test_response_is_editable_once_present() {
        let mut app = App::for_tests();
        app.state.focus = Focus::Response;

        app.handle_char('x');
        assert!(app.state.session.response.is_none());

        app.state
            .session
            .set_result(&Ok("Thanks".to_string()), "DeepSeek V3");
        app.handle_char('!');
        assert_eq!(app.state.session.last_result(), Some("Thanks!"));
    }

    #[tokio::test]
    async fn test_editing_long_response_keeps_cursor_visible() {
        let mut app = App::for_tests();
        app.terminal_area = ratatui::layout::Rect::new(0, 0, 60, 30);
        app.state
            .session
            .set_result(&Ok("word ".repeat(600)), "DeepSeek V3");
        app.state.focus = Focus::Response;
        assert_eq!(app.state.session.response.as_ref().unwrap().scroll, 0);

        app.handle_char('!');
        let response = app.state.session.response.as_ref().unwrap();
        let limit =
            crate::ui::response_scroll_limit(&response.text, true, app.terminal_area);
        assert!(limit > 0);
        assert_eq!(response.scroll, limit);
    }
}
