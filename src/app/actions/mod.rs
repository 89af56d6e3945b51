//! Action handlers for user input
//!
//! This module is split into focused submodules:
//! - `navigation`: Focus movement, selector changes and scrolling
//! - `input`: Text input handling for the two editors
//! - `session`: Generate, copy and clear

mod input;
mod navigation;
mod session;

use anyhow::Result;

use crate::app::state::ModalState;
use crate::input::Action;

use super::App;

impl App {
    pub(crate) async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            // Navigation
            Action::Up => {
                if self.state.modal.is_help() {
                    self.help_scroll_up();
                } else {
                    self.move_up();
                }
            }
            Action::Down => {
                if self.state.modal.is_help() {
                    self.help_scroll_down();
                } else {
                    self.move_down();
                }
            }
            Action::PageUp => self.page_up(),
            Action::PageDown => self.page_down(),
            Action::NextPane => self.state.focus = self.state.focus.next(),
            Action::PrevPane => self.state.focus = self.state.focus.prev(),

            // Generation
            Action::Generate => self.generate().await,
            Action::Copy => self.copy_response(),
            Action::Clear => self.clear_session(),

            // App
            Action::Quit => {} // Handled in event loop
            Action::Back => {
                if self.state.modal.is_active() {
                    self.state.modal = ModalState::None;
                }
            }
            Action::Help => self.toggle_help(),
        }
        Ok(())
    }

    fn toggle_help(&mut self) {
        if self.state.modal.is_help() {
            self.state.modal = ModalState::None;
        } else if !self.state.modal.is_active() {
            self.state.modal = ModalState::Help {
                keybindings: self.bindings.all_bindings(),
                scroll: 0,
            };
        }
    }

    pub(crate) fn help_scroll_down(&mut self) {
        if let ModalState::Help {
            scroll,
            keybindings,
        } = &mut self.state.modal
        {
            // One line per binding plus a header and spacer per category
            let mut categories = 0;
            let mut last_category = "";
            for kb in keybindings.iter() {
                if kb.category != last_category {
                    categories += 1;
                    last_category = kb.category;
                }
            }
            let content_lines = keybindings.len() + categories * 2;
            let max_scroll = content_lines.saturating_sub(10);

            if *scroll < max_scroll {
                *scroll = scroll.saturating_add(1);
            }
        }
    }

    pub(crate) fn help_scroll_up(&mut self) {
        if let ModalState::Help { scroll, .. } = &mut self.state.modal {
            *scroll = scroll.saturating_sub(1);
        }
    }
}
