//! Generate, copy and clear

use crate::ai::{AiCommand, GenerationResult, catalog};

use super::super::App;

/// OSC 52 gets no acknowledgement, so the status only claims the send
pub(crate) const COPIED_MESSAGE: &str = "Response sent to terminal clipboard";

impl App {
    /// Hand the current session to the AI actor
    pub(crate) async fn generate(&mut self) {
        if self.pending_request.is_some() {
            self.state.set_error("Already generating a response");
            return;
        }

        let request = self.state.session.request();
        let model = self.state.session.model();
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        if self
            .ai_actor
            .cmd_tx
            .send(AiCommand::Generate {
                request_id,
                request,
            })
            .await
            .is_err()
        {
            tracing::error!("AI actor is not running");
            self.state.set_error("Generation service is not running");
            return;
        }

        self.pending_request = Some(request_id);
        self.state.status.loading = true;
        self.state
            .set_status(format!("Generating response with {}...", model.label));
    }

    /// Apply a finished generation. Results for anything but the pending
    /// request (e.g. one issued before a clear) are dropped.
    pub(crate) fn apply_generation(&mut self, request_id: u64, result: GenerationResult) {
        if self.pending_request != Some(request_id) {
            tracing::debug!(request_id, "discarding stale generation result");
            return;
        }
        self.pending_request = None;
        self.state.status.loading = false;

        let model = self.state.session.model().label;
        match &result {
            Ok(_) => self.state.set_status(format!("Response generated with {}", model)),
            Err(e) => self.state.set_status(format!("Generation failed ({:?})", e.kind())),
        }
        self.state.session.set_result(&result, model);
    }

    /// Queue the displayed response for the terminal clipboard
    pub(crate) fn copy_response(&mut self) {
        match self.state.session.last_result() {
            Some(text) => {
                self.clipboard_outbox = Some(text.to_string());
                self.state.set_status(COPIED_MESSAGE);
            }
            None => self.state.set_error("Nothing to copy yet"),
        }
    }

    /// Discard everything the session holds, including a pending request
    pub(crate) fn clear_session(&mut self) {
        let model_index = catalog::model_index(&self.config.ui.default_model).unwrap_or(0);
        let style_index = catalog::style_index(&self.config.ui.default_style).unwrap_or(0);

        self.state.session.clear(model_index, style_index);
        self.pending_request = None;
        self.clipboard_outbox = None;
        self.state.status.loading = false;
        self.state.status.clear_error();
        self.state.set_status("Cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiEvent;
    use crate::ai::error::GenerationError;
    use crate::app::state::Focus;

    #[tokio::test]
    async fn test_generate_round_trip() {
        let mut app = App::for_tests();
        app.state.session.email = "Can we move the call?".to_string();

        app.generate().await;
        assert!(app.state.status.loading);
        assert!(app.pending_request.is_some());

        let AiEvent::Generated { request_id, result } =
            app.ai_actor.event_rx.recv().await.unwrap();
        app.apply_generation(request_id, result);

        assert!(!app.state.status.loading);
        assert_eq!(app.pending_request, None);
        assert_eq!(app.state.session.last_result(), Some("fake reply"));
    }

    #[tokio::test]
    async fn test_blank_email_shows_canned_message() {
        let mut app = App::for_tests();
        app.state.session.email = "   ".to_string();

        app.generate().await;
        let AiEvent::Generated { request_id, result } =
            app.ai_actor.event_rx.recv().await.unwrap();
        assert_eq!(result, Err(GenerationError::EmptyInput));
        app.apply_generation(request_id, result);

        assert_eq!(
            app.state.session.last_result(),
            Some("Please enter an email to generate a response.")
        );
    }

    #[tokio::test]
    async fn test_second_generate_while_busy_is_rejected() {
        let mut app = App::for_tests();
        app.state.session.email = "Hello".to_string();

        app.generate().await;
        let first = app.pending_request;
        app.generate().await;

        assert_eq!(app.pending_request, first);
        assert_eq!(
            app.state.status.error.as_deref(),
            Some("Already generating a response")
        );
    }

    #[tokio::test]
    async fn test_result_after_clear_is_discarded() {
        let mut app = App::for_tests();
        app.state.session.email = "Hello".to_string();

        app.generate().await;
        app.clear_session();

        let AiEvent::Generated { request_id, result } =
            app.ai_actor.event_rx.recv().await.unwrap();
        app.apply_generation(request_id, result);

        assert_eq!(app.state.session.last_result(), None);
        assert!(app.state.session.email.is_empty());
        assert!(!app.state.status.loading);
    }

    #[tokio::test]
    async fn test_copy_requires_a_response() {
        let mut app = App::for_tests();

        app.copy_response();
        assert!(app.clipboard_outbox.is_none());
        assert!(app.state.status.error.is_some());

        app.state
            .session
            .set_result(&Ok("Dear Ana".to_string()), "DeepSeek V3");
        app.copy_response();
        assert_eq!(app.clipboard_outbox.as_deref(), Some("Dear Ana"));
        assert_eq!(app.state.status.message, COPIED_MESSAGE);
    }

    #[tokio::test]
    async fn test_copy_sends_an_empty_reply() {
        let mut app = App::for_tests();
        // A null completion from OpenRouter displays as ""
        app.state.session.set_result(&Ok(String::new()), "Moonlight 16B");

        app.copy_response();
        assert_eq!(app.clipboard_outbox.as_deref(), Some(""));
        assert!(app.state.status.error.is_none());
        assert_eq!(app.state.status.message, COPIED_MESSAGE);
    }

    #[tokio::test]
    async fn test_clear_restores_default_selections() {
        let mut app = App::for_tests();
        app.state.focus = Focus::Response;
        app.state.session.model_index = 3;
        app.state.session.style_index = 4;
        app.state
            .session
            .set_result(&Ok("text".to_string()), "Microsoft Phi-3 Medium");

        app.clear_session();

        assert_eq!(app.state.session.model_index, 0);
        assert_eq!(app.state.session.style_index, 0);
        assert_eq!(app.state.session.last_result(), None);
    }
}
