//! Application state types
//!
//! All state types live here to maintain clean dependency:
//! UI layer imports from app layer, not vice versa.

use chrono::{DateTime, Local};

use crate::ai::catalog::{MODELS, ModelEntry, WRITING_STYLES, WritingStyle};
use crate::ai::{ErrorKind, GenerationRequest, GenerationResult, display_text};
use crate::constants::ERROR_TTL_SECS;
use crate::input::KeybindingEntry;

/// Pane that receives keyboard input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Model,
    Style,
    Email,
    Response,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Model => Self::Style,
            Self::Style => Self::Email,
            Self::Email => Self::Response,
            Self::Response => Self::Model,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Model => Self::Response,
            Self::Style => Self::Model,
            Self::Email => Self::Style,
            Self::Response => Self::Email,
        }
    }

    pub fn is_editor(self) -> bool {
        matches!(self, Self::Email | Self::Response)
    }

    pub fn is_selector(self) -> bool {
        matches!(self, Self::Model | Self::Style)
    }
}

/// Modal overlay state
#[derive(Debug, Clone, Default)]
pub enum ModalState {
    #[default]
    None,
    Help {
        keybindings: Vec<KeybindingEntry>,
        scroll: usize,
    },
}

impl ModalState {
    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help { .. })
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub loading: bool,
    pub error: Option<String>,
    pub error_time: Option<std::time::Instant>,
    pub message: String,
    /// Persists after error bar expires - shown as indicator in status bar
    pub has_unacknowledged_error: bool,
}

impl StatusState {
    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
        self.error_time = Some(std::time::Instant::now());
        self.has_unacknowledged_error = true;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.error_time = None;
    }

    /// Acknowledge the error indicator (clear the persistent flag)
    pub fn acknowledge_error(&mut self) {
        self.has_unacknowledged_error = false;
    }

    /// Clear error if TTL expired. Returns true if error was cleared.
    pub fn clear_error_if_expired(&mut self) -> bool {
        if let Some(time) = self.error_time
            && time.elapsed().as_secs() >= ERROR_TTL_SECS
        {
            self.clear_error();
            true
        } else {
            false
        }
    }

    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = msg.to_string();
    }
}

/// The displayed response, editable by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseState {
    pub text: String,
    /// Set when the text is a rendered failure
    pub error_kind: Option<ErrorKind>,
    /// Model that produced it
    pub model_label: &'static str,
    pub generated_at: DateTime<Local>,
    pub scroll: u16,
}

/// Everything the user has entered or received in this session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub email: String,
    pub model_index: usize,
    pub style_index: usize,
    pub response: Option<ResponseState>,
}

impl SessionState {
    pub fn new(model_index: usize, style_index: usize) -> Self {
        Self {
            model_index,
            style_index,
            ..Default::default()
        }
    }

    pub fn model(&self) -> &'static ModelEntry {
        &MODELS[self.model_index.min(MODELS.len() - 1)]
    }

    pub fn style(&self) -> &'static WritingStyle {
        &WRITING_STYLES[self.style_index.min(WRITING_STYLES.len() - 1)]
    }

    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(self.email.clone(), self.model().label, self.style().label)
    }

    /// Replace the displayed response with a completed generation
    pub fn set_result(&mut self, result: &GenerationResult, model_label: &'static str) {
        self.response = Some(ResponseState {
            text: display_text(result),
            error_kind: result.as_ref().err().map(|e| e.kind()),
            model_label,
            generated_at: Local::now(),
            scroll: 0,
        });
    }

    /// Text currently shown in the response pane
    pub fn last_result(&self) -> Option<&str> {
        self.response.as_ref().map(|r| r.text.as_str())
    }

    /// Drop all input and output and return to the given selections
    pub fn clear(&mut self, model_index: usize, style_index: usize) {
        *self = Self::new(model_index, style_index);
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub focus: Focus,
    pub session: SessionState,
    pub status: StatusState,
    pub modal: ModalState,
}

impl AppState {
    pub fn new(model_index: usize, style_index: usize) -> Self {
        Self {
            session: SessionState::new(model_index, style_index),
            ..Default::default()
        }
    }

    pub fn set_error(&mut self, error: impl ToString) {
        self.status.set_error(error);
    }

    pub fn clear_error_if_expired(&mut self) -> bool {
        self.status.clear_error_if_expired()
    }

    pub fn acknowledge_error(&mut self) {
        self.status.acknowledge_error();
    }

    pub fn has_unacknowledged_error(&self) -> bool {
        self.status.has_unacknowledged_error
    }

    pub fn set_status(&mut self, msg: impl ToString) {
        self.status.set_message(msg);
    }
}
