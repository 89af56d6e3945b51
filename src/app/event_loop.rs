//! Main event loop and AI event processing

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::layout::Rect;
use std::time::Duration;

use crate::ai::AiEvent;
use crate::constants::{POLL_BUSY_MS, POLL_IDLE_MS};
use crate::input::{InputResult, handle_input};

use super::App;
use super::render_thread::RenderThread;

impl App {
    pub(crate) async fn event_loop(&mut self, render_thread: &RenderThread) -> Result<()> {
        loop {
            // Process AI events from the actor (non-blocking)
            if self.process_ai_events() {
                self.dirty = true;
            }

            // Clear expired errors
            if self.state.clear_error_if_expired() {
                self.dirty = true;
            }

            if let Some(text) = self.clipboard_outbox.take() {
                render_thread.copy_to_clipboard(text);
            }

            // Render only when dirty (non-blocking - sends to render thread)
            if self.dirty {
                render_thread.render(self.state.clone());
                self.dirty = false;
            }

            // Faster polling while busy keeps the spinner moving
            let poll_timeout = if self.state.status.loading {
                POLL_BUSY_MS
            } else {
                POLL_IDLE_MS
            };
            if event::poll(Duration::from_millis(poll_timeout))? {
                let evt = event::read()?;
                if let Event::Resize(width, height) = evt {
                    self.terminal_area = Rect::new(0, 0, width, height);
                    self.clamp_response_scroll();
                }
                // Any input event (including resize) requires re-render
                self.dirty = true;
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => {
                        self.state.acknowledge_error();
                        self.handle_action(action).await?;
                    }
                    InputResult::Char(c) => {
                        self.state.acknowledge_error();
                        self.handle_char(c);
                    }
                    InputResult::Backspace => {
                        self.state.acknowledge_error();
                        self.handle_backspace();
                    }
                    InputResult::Paste(text) => {
                        self.state.acknowledge_error();
                        self.handle_paste(&text);
                    }
                    InputResult::Continue => {}
                }
            } else if self.state.status.loading {
                self.dirty = true;
            }
        }

        Ok(())
    }

    /// Process events from the AI actor (non-blocking). Returns true if any events were processed.
    pub(crate) fn process_ai_events(&mut self) -> bool {
        let mut had_events = false;
        while let Ok(event) = self.ai_actor.event_rx.try_recv() {
            had_events = true;
            match event {
                AiEvent::Generated { request_id, result } => {
                    self.apply_generation(request_id, result);
                }
            }
        }
        had_events
    }
}
