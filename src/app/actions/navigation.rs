//! Navigation actions (selectors, scrolling)

use crate::ai::{MODELS, WRITING_STYLES};
use crate::app::state::Focus;
use crate::constants::RESPONSE_PAGE_LINES;
use crate::ui::response_scroll_limit;

use super::super::App;

impl App {
    pub(crate) fn move_up(&mut self) {
        let session = &mut self.state.session;
        match self.state.focus {
            Focus::Model => session.model_index = session.model_index.saturating_sub(1),
            Focus::Style => session.style_index = session.style_index.saturating_sub(1),
            Focus::Response => self.scroll_response(-1),
            Focus::Email => {}
        }
    }

    pub(crate) fn move_down(&mut self) {
        let session = &mut self.state.session;
        match self.state.focus {
            Focus::Model => {
                session.model_index = (session.model_index + 1).min(MODELS.len() - 1);
            }
            Focus::Style => {
                session.style_index = (session.style_index + 1).min(WRITING_STYLES.len() - 1);
            }
            Focus::Response => self.scroll_response(1),
            Focus::Email => {}
        }
    }

    pub(crate) fn page_up(&mut self) {
        self.scroll_response(-(RESPONSE_PAGE_LINES as i32));
    }

    pub(crate) fn page_down(&mut self) {
        self.scroll_response(RESPONSE_PAGE_LINES as i32);
    }

    /// Largest response scroll offset at the current terminal size
    fn response_scroll_max(&self) -> u16 {
        self.state.session.response.as_ref().map_or(0, |response| {
            response_scroll_limit(
                &response.text,
                self.state.focus == Focus::Response,
                self.terminal_area,
            )
        })
    }

    /// Scroll the response pane, clamped to its wrapped rows
    fn scroll_response(&mut self, delta: i32) {
        let max = self.response_scroll_max() as i32;
        if let Some(response) = &mut self.state.session.response {
            let next = (response.scroll as i32 + delta).clamp(0, max);
            response.scroll = next as u16;
        }
    }

    /// Keep the response offset valid after a resize
    pub(crate) fn clamp_response_scroll(&mut self) {
        let max = self.response_scroll_max();
        if let Some(response) = &mut self.state.session.response {
            response.scroll = response.scroll.min(max);
        }
    }

    /// Show the end of the response, where edits land
    pub(crate) fn follow_response_tail(&mut self) {
        let max = self.response_scroll_max();
        if let Some(response) = &mut self.state.session.response {
            response.scroll = max;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::app::state::Focus;
    use ratatui::layout::Rect;

    #[tokio::test]
    async fn test_selectors_clamp_at_ends() {
        let mut app = App::for_tests();

        app.state.focus = Focus::Model;
        app.move_up();
        assert_eq!(app.state.session.model_index, 0);
        for _ in 0..20 {
            app.move_down();
        }
        assert_eq!(app.state.session.model().label, "Moonlight 16B");

        app.state.focus = Focus::Style;
        for _ in 0..20 {
            app.move_down();
        }
        assert_eq!(app.state.session.style().label, "Empathetic");
        app.move_up();
        assert_eq!(app.state.session.style().label, "Detailed");
    }

    fn scroll(app: &App) -> u16 {
        app.state.session.response.as_ref().unwrap().scroll
    }

    #[tokio::test]
    async fn test_short_response_does_not_scroll() {
        let mut app = App::for_tests();
        app.state
            .session
            .set_result(&Ok("one\ntwo\nthree".to_string()), "DeepSeek V3");
        app.state.focus = Focus::Response;

        app.page_down();
        app.move_down();
        assert_eq!(scroll(&app), 0);
    }

    #[tokio::test]
    async fn test_long_paragraph_scrolls_to_its_end() {
        let mut app = App::for_tests();
        app.terminal_area = Rect::new(0, 0, 60, 30);
        let text = format!("{}END", "x".repeat(2000));
        app.state.session.set_result(&Ok(text), "DeepSeek V3");
        app.state.focus = Focus::Response;

        for _ in 0..100 {
            app.page_down();
        }
        let max = crate::ui::response_scroll_limit(
            &app.state.session.response.as_ref().unwrap().text,
            true,
            app.terminal_area,
        );
        assert!(max > 0);
        assert_eq!(scroll(&app), max);

        let screen = draw(&app, 60, 30);
        assert!(screen.contains("END"));

        app.move_up();
        assert_eq!(scroll(&app), max - 1);
        app.page_up();
        app.page_up();
        app.page_up();
        app.page_up();
        assert_eq!(scroll(&app), max.saturating_sub(41));
    }

    #[tokio::test]
    async fn test_resize_clamps_response_scroll() {
        let mut app = App::for_tests();
        app.terminal_area = Rect::new(0, 0, 60, 30);
        app.state
            .session
            .set_result(&Ok("y".repeat(2000)), "DeepSeek V3");
        app.state.focus = Focus::Response;
        app.follow_response_tail();
        let narrow = scroll(&app);

        app.terminal_area = Rect::new(0, 0, 200, 60);
        app.clamp_response_scroll();
        assert!(scroll(&app) < narrow);
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        use ratatui::{Terminal, backend::TestBackend};

        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| crate::ui::render(f, &app.state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }
}
