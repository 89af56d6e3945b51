//! Main screen: selectors, email input and generated response

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::status_bar::{StatusInfo, spinner_char, status_bar};
use super::theme::{Theme, borders, symbols, use_modern_spacing, with_selection_bg};
use super::widgets::{error_bar, help_bar, max_scroll, sanitize_text, truncate_string};
use crate::ai::ErrorKind;
use crate::ai::catalog::{MODELS, WRITING_STYLES};
use crate::app::state::{AppState, Focus};
use crate::constants::{
    CONTENT_PADDING_H, EMAIL_PANE_PERCENT, HELP_BAR_HEIGHT_MODERN, MIN_SIDE_BY_SIDE_WIDTH,
    SELECTOR_COLUMN_WIDTH, STATUS_BAR_HEIGHT_MODERN,
};

/// Areas of the drafter screen for one frame size
struct DrafterLayout {
    status: Rect,
    selectors: SelectorLayout,
    email: Rect,
    response: Rect,
    bottom: Rect,
}

enum SelectorLayout {
    /// Model, style and instruction stacked beside the editors
    Column(Rect),
    /// Model and style side by side above the editors
    Row { model: Rect, style: Rect },
}

fn drafter_layout(area: Rect) -> DrafterLayout {
    let (status_height, help_height) = if use_modern_spacing() {
        (STATUS_BAR_HEIGHT_MODERN, HELP_BAR_HEIGHT_MODERN)
    } else {
        (1, 1)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(status_height), // Status bar
            Constraint::Min(0),                // Panes
            Constraint::Length(help_height),   // Help bar or error
        ])
        .split(area);

    let main_area = if use_modern_spacing() {
        pad_horizontal(chunks[1], CONTENT_PADDING_H)
    } else {
        chunks[1]
    };

    let (selectors, editor_area) = if main_area.width >= MIN_SIDE_BY_SIDE_WIDTH {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(SELECTOR_COLUMN_WIDTH),
                Constraint::Min(0),
            ])
            .split(main_area);
        (SelectorLayout::Column(split[0]), split[1])
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(selector_height()),
                Constraint::Min(0),
            ])
            .split(main_area);
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        (
            SelectorLayout::Row {
                model: row[0],
                style: row[1],
            },
            rows[1],
        )
    };

    let editors = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(EMAIL_PANE_PERCENT),
            Constraint::Percentage(100 - EMAIL_PANE_PERCENT),
        ])
        .split(editor_area);

    DrafterLayout {
        status: first_line(chunks[0]),
        selectors,
        email: editors[0],
        response: editors[1],
        bottom: last_line(chunks[2]),
    }
}

pub fn render_drafter(frame: &mut Frame, state: &AppState) {
    frame.render_widget(Block::default().style(Theme::main_bg()), frame.area());

    let layout = drafter_layout(frame.area());

    status_bar(frame, layout.status, &StatusInfo::from_state(state));

    match layout.selectors {
        SelectorLayout::Column(area) => render_selector_column(frame, area, state),
        SelectorLayout::Row { model, style } => {
            render_model_selector(frame, model, state);
            render_style_selector(frame, style, state);
        }
    }
    render_email(frame, layout.email, state);
    render_response(frame, layout.response, state);

    if let Some(ref error) = state.status.error {
        error_bar(frame, layout.bottom, error);
    } else {
        help_bar(frame, layout.bottom, hints_for(state.focus));
    }
}

/// Text area inside the response pane's border for a frame of `area`
pub fn response_viewport(area: Rect) -> Rect {
    Block::default()
        .borders(Borders::ALL)
        .inner(drafter_layout(area).response)
}

/// Text the response pane draws for `text`
fn response_display_text(text: &str, focused: bool) -> String {
    let mut shown = sanitize_text(text);
    if focused {
        shown.push_str(symbols::CURSOR);
    }
    shown
}

/// Largest scroll offset that still fills the response pane
pub fn response_scroll_limit(text: &str, focused: bool, area: Rect) -> u16 {
    let viewport = response_viewport(area);
    max_scroll(
        &response_display_text(text, focused),
        viewport.width,
        viewport.height,
    )
}

fn selector_height() -> u16 {
    MODELS.len().max(WRITING_STYLES.len()) as u16 + 2
}

fn first_line(area: Rect) -> Rect {
    Rect { height: area.height.min(1), ..area }
}

fn last_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    }
}

fn pad_horizontal(area: Rect, padding: u16) -> Rect {
    if area.width <= padding * 2 {
        return area;
    }
    Rect {
        x: area.x + padding,
        width: area.width - padding * 2,
        ..area
    }
}

fn hints_for(focus: Focus) -> &'static [(&'static str, &'static str)] {
    match focus {
        Focus::Model | Focus::Style => &[
            ("j/k", "select"),
            ("Tab", "next pane"),
            ("Ctrl+G", "generate"),
            ("Ctrl+Y", "copy"),
            ("Ctrl+L", "clear"),
            ("F1", "help"),
        ],
        Focus::Email => &[
            ("Type/paste", "email"),
            ("Tab", "next pane"),
            ("Ctrl+G", "generate"),
            ("Ctrl+L", "clear"),
            ("F1", "help"),
        ],
        Focus::Response => &[
            ("Type", "edit"),
            ("↑/↓", "scroll"),
            ("Ctrl+Y", "copy"),
            ("Ctrl+G", "regenerate"),
            ("F1", "help"),
        ],
    }
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), borders::input_focused())
    } else {
        (Theme::border(), borders::panel())
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .title(title)
}

fn render_selector_column(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(MODELS.len() as u16 + 2),
            Constraint::Length(WRITING_STYLES.len() as u16 + 2),
            Constraint::Min(0), // Style instruction
        ])
        .split(area);

    render_model_selector(frame, chunks[0], state);
    render_style_selector(frame, chunks[1], state);

    let style = state.session.style();
    let paragraph = Paragraph::new(style.instruction)
        .style(Theme::text_muted())
        .wrap(Wrap { trim: true })
        .block(pane_block(format!(" {} ", style.label), false));
    frame.render_widget(paragraph, chunks[2]);
}

fn render_model_selector(frame: &mut Frame, area: Rect, state: &AppState) {
    let labels: Vec<&str> = MODELS.iter().map(|m| m.label).collect();
    render_selector(
        frame,
        area,
        " Model ",
        &labels,
        state.session.model_index,
        state.focus == Focus::Model,
    );
}

fn render_style_selector(frame: &mut Frame, area: Rect, state: &AppState) {
    let labels: Vec<&str> = WRITING_STYLES.iter().map(|s| s.label).collect();
    render_selector(
        frame,
        area,
        " Style ",
        &labels,
        state.session.style_index,
        state.focus == Focus::Style,
    );
}

fn render_selector(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    labels: &[&str],
    selected: usize,
    focused: bool,
) {
    let label_width = area.width.saturating_sub(2 + symbols::SELECTED.width() as u16) as usize;

    let items: Vec<ListItem> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let is_selected = idx == selected;
            let (marker, style) = if is_selected && focused {
                (symbols::SELECTED, Theme::selected_bold())
            } else if is_selected {
                (symbols::SELECTED, Theme::text_accent())
            } else {
                (symbols::UNSELECTED, Theme::text_secondary())
            };
            let row_style = with_selection_bg(style, is_selected && focused);
            ListItem::new(Line::from(vec![
                Span::styled(marker, row_style),
                Span::styled(truncate_string(label, label_width), row_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(pane_block(title.to_string(), focused));
    frame.render_widget(list, area);
}

fn render_email(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Email;
    let email = &state.session.email;
    let title = format!(" Email ({} chars) ", email.chars().count());
    let block = pane_block(title, focused);
    let inner = block.inner(area);

    let paragraph = if email.is_empty() && !focused {
        Paragraph::new("Paste the email you want to answer").style(Theme::text_muted())
    } else {
        let mut text = sanitize_text(email);
        let style = if focused {
            text.push_str(symbols::CURSOR);
            Theme::text()
        } else {
            Theme::text_secondary()
        };
        let scroll = max_scroll(&text, inner.width, inner.height);
        Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
    };

    frame.render_widget(paragraph.block(block), area);
}

fn render_response(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Response;

    let Some(ref response) = state.session.response else {
        let placeholder = if state.status.loading {
            format!("{} Generating...", spinner_char())
        } else {
            "Press Ctrl+G to draft a reply".to_string()
        };
        let paragraph = Paragraph::new(placeholder)
            .style(Theme::text_muted())
            .block(pane_block(" Response ".to_string(), focused));
        frame.render_widget(paragraph, area);
        return;
    };

    let title = format!(
        " Response · {} · {} ",
        response.model_label,
        response.generated_at.format("%H:%M")
    );
    let style = match response.error_kind {
        None if focused => Theme::text(),
        None => Theme::text_secondary(),
        Some(ErrorKind::Validation) => Theme::text_warning(),
        Some(_) => Theme::text_error(),
    };

    let block = pane_block(title, focused);
    let inner = block.inner(area);
    let text = response_display_text(&response.text, focused);
    // Stored offset may predate a resize
    let scroll = response
        .scroll
        .min(max_scroll(&text, inner.width, inner.height));

    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_horizontal() {
        let area = Rect::new(0, 0, 100, 10);
        assert_eq!(pad_horizontal(area, 2), Rect::new(2, 0, 96, 10));

        let narrow = Rect::new(0, 0, 3, 10);
        assert_eq!(pad_horizontal(narrow, 2), narrow);
    }

    #[test]
    fn test_bar_lines() {
        let area = Rect::new(0, 5, 80, 2);
        assert_eq!(first_line(area), Rect::new(0, 5, 80, 1));
        assert_eq!(last_line(area), Rect::new(0, 6, 80, 1));
    }

    #[test]
    fn test_response_viewport_sits_inside_the_frame() {
        for area in [Rect::new(0, 0, 120, 40), Rect::new(0, 0, 60, 30)] {
            let viewport = response_viewport(area);
            assert!(viewport.width > 0 && viewport.height > 0);
            assert!(area.contains(viewport.as_position()));
            assert!(viewport.bottom() < area.bottom());
        }
    }

    #[test]
    fn test_long_paragraph_scroll_limit_reaches_the_end() {
        let area = Rect::new(0, 0, 60, 30);
        let viewport = response_viewport(area);
        let text = "x".repeat(2000);

        let limit = response_scroll_limit(&text, false, area);
        let rows = (2000usize).div_ceil(viewport.width as usize);
        assert_eq!(limit as usize, rows - viewport.height as usize);
        assert_eq!(response_scroll_limit("short", true, area), 0);
    }

    #[test]
    fn test_every_pane_has_help_hints() {
        for focus in [Focus::Model, Focus::Style, Focus::Email, Focus::Response] {
            assert!(hints_for(focus).iter().any(|(_, desc)| *desc == "help"));
        }
    }
}
