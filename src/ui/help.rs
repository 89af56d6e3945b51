//! Keybinding help overlay

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use super::components::centered_rect_constrained;
use super::theme::{Theme, borders};
use crate::input::KeybindingEntry;

const KEY_WIDTH: usize = 14;

pub fn render_help_popup(frame: &mut Frame, area: Rect, keys: &[KeybindingEntry], scroll: usize) {
    let mut category_count = 0;
    let mut last: Option<&str> = None;
    for key in keys {
        if last != Some(key.category) {
            category_count += 1;
            last = Some(key.category);
        }
    }
    let content_height = keys.len() + category_count * 2;

    let popup_area =
        centered_rect_constrained(area, 36, 54, 10, content_height as u16 + 2).intersection(area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .title_bottom(" j/k scroll │ F1 or Esc close ")
        .borders(Borders::ALL)
        .border_type(borders::popup())
        .border_style(Theme::border_focused());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let items: Vec<ListItem> = help_lines(keys, inner.width)
        .into_iter()
        .skip(scroll)
        .map(ListItem::new)
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), inner);
}

/// Keybindings grouped under a header per category
fn help_lines(keys: &[KeybindingEntry], width: u16) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut current_category: Option<&str> = None;

    for entry in keys {
        if current_category != Some(entry.category) {
            if current_category.is_some() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(vec![
                Span::styled(
                    format!("── {} ", entry.category),
                    Theme::text_secondary().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "─".repeat(width.saturating_sub(entry.category.len() as u16 + 4) as usize),
                    Theme::border(),
                ),
            ]));
            current_category = Some(entry.category);
        }

        let key_display = if entry.key.chars().count() > KEY_WIDTH {
            entry.key.chars().take(KEY_WIDTH).collect::<String>()
        } else {
            format!("{:width$}", entry.key, width = KEY_WIDTH)
        };

        lines.push(Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(key_display, Theme::text_accent()),
            Span::styled(entry.description.as_str(), Theme::text()),
        ]));
    }

    lines
}
