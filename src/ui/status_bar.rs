//! Status bar with busy indicator and the active model

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::{Theme, symbols};
use crate::app::state::AppState;
use crate::constants::SPINNER_FRAME_MS;

/// Status bar info for rendering
pub struct StatusInfo<'a> {
    pub model: &'a str,
    pub provider: &'a str,
    pub style: &'a str,
    pub loading: bool,
    pub message: Option<&'a str>,
    /// Whether there's an unacknowledged error (show indicator)
    pub has_error: bool,
    /// When the displayed response arrived, as "HH:MM"
    pub generated_at: Option<String>,
}

impl<'a> StatusInfo<'a> {
    pub fn from_state(state: &'a AppState) -> Self {
        let model = state.session.model();
        Self {
            model: model.label,
            provider: model.provider.name(),
            style: state.session.style().label,
            loading: state.status.loading,
            message: Some(state.status.message.as_str()).filter(|m| !m.is_empty()),
            has_error: state.has_unacknowledged_error(),
            generated_at: state
                .session
                .response
                .as_ref()
                .map(|r| r.generated_at.format("%H:%M").to_string()),
        }
    }
}

/// Calculate display width of a string (accounting for Unicode)
fn display_width(s: &str) -> usize {
    use unicode_width::UnicodeWidthStr;
    s.width()
}

/// Truncate string to fit display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if max_width < 4 {
        return s.chars().take(max_width).collect();
    }

    let mut width = 0;
    let mut result = String::new();

    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);
        if width + char_width > max_width - 3 {
            result.push_str("...");
            return result;
        }
        width += char_width;
        result.push(c);
    }
    result
}

pub fn status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo) {
    let style = Theme::status_bar();
    let width = area.width as usize;

    let (indicator, indicator_style) = if info.loading {
        (format!(" {} ", spinner_char()), Theme::status_busy())
    } else {
        (format!(" {} ", symbols::IDLE), Theme::status_idle())
    };
    let error_indicator = if info.has_error {
        format!("{} ", symbols::ERROR)
    } else {
        String::new()
    };

    let model = format!("{} ", info.model);
    let provider = format!("[{}] ", info.provider);
    let writing_style = format!("· {}", info.style);

    let time_info = info
        .generated_at
        .as_ref()
        .map(|t| format!(" │ {} ", t))
        .unwrap_or_else(|| " ".to_string());

    let left_width = display_width(&indicator)
        + display_width(&error_indicator)
        + display_width(&model)
        + display_width(&provider)
        + display_width(&writing_style);
    let min_padding = 2;
    let available_for_message =
        width.saturating_sub(left_width + display_width(&time_info) + min_padding);

    let message = match info.message {
        Some(msg) if display_width(msg) <= available_for_message => msg.to_string(),
        Some(msg) => truncate_to_width(msg, available_for_message),
        None => String::new(),
    };

    let right_width = display_width(&message) + display_width(&time_info);
    let padding = " ".repeat(width.saturating_sub(left_width + right_width));

    let mut spans = vec![Span::styled(indicator, indicator_style)];
    if info.has_error {
        spans.push(Span::styled(error_indicator, Theme::status_error()));
    }
    spans.extend([
        Span::styled(model, style.add_modifier(Modifier::BOLD)),
        Span::styled(provider, Theme::provider_badge()),
        Span::styled(writing_style, Theme::status_muted()),
        Span::styled(padding, style),
        Span::styled(message, Theme::status_info()),
        Span::styled(time_info, Theme::status_muted()),
    ]);

    let paragraph = Paragraph::new(Line::from(spans)).style(style);
    frame.render_widget(paragraph, area);
}

/// Get an animated spinner character for loading states
pub fn spinner_char() -> char {
    let spinner = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let idx = (millis / SPINNER_FRAME_MS) as usize % spinner.chars().count();

    spinner.chars().nth(idx).unwrap_or('*')
}
