use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    Up,
    Down,
    PageUp,
    PageDown,
    NextPane,
    PrevPane,

    // Generation
    Generate,
    Copy,
    Clear,

    // App
    Quit,
    Back,
    Help,
}

pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

/// A displayable keybinding entry
#[derive(Debug, Clone)]
pub struct KeybindingEntry {
    pub key: String,
    pub description: String,
    pub category: &'static str,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            bindings: Self::default_bindings(),
        }
    }

    pub fn get(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(event).copied()
    }

    /// Get all keybindings as displayable entries grouped by category
    pub fn all_bindings(&self) -> Vec<KeybindingEntry> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(event, action)| KeybindingEntry {
                key: format_key_event(event),
                description: action_description(action).to_string(),
                category: action_category(action),
            })
            .collect();

        entries.sort_by(|a, b| {
            category_order(a.category)
                .cmp(&category_order(b.category))
                .then_with(|| a.description.cmp(&b.description))
                .then_with(|| a.key.cmp(&b.key))
        });
        entries
    }

    /// Every binding carries a modifier or is a non-character key, so plain
    /// typing always reaches the focused editor.
    fn default_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Navigation
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::PageUp), Action::PageUp);
        map.insert(key_code(KeyCode::PageDown), Action::PageDown);
        map.insert(key_code(KeyCode::Tab), Action::NextPane);
        map.insert(shift_key_code(KeyCode::BackTab), Action::PrevPane);

        // Generation
        map.insert(ctrl_key('g'), Action::Generate);
        map.insert(ctrl_key('y'), Action::Copy);
        map.insert(ctrl_key('l'), Action::Clear);

        // App
        map.insert(ctrl_key('q'), Action::Quit);
        map.insert(ctrl_key('c'), Action::Quit);
        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(key_code(KeyCode::F(1)), Action::Help);

        map
    }
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn shift_key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

/// Format a KeyEvent for display
fn format_key_event(event: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl+");
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt+");
    }

    let key_str = match event.code {
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            c.to_ascii_uppercase().to_string()
        }
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", event.code),
    };

    format!("{}{}", parts.join(""), key_str)
}

fn action_description(action: &Action) -> &'static str {
    match action {
        Action::Up => "Previous option / scroll up",
        Action::Down => "Next option / scroll down",
        Action::PageUp => "Scroll response up",
        Action::PageDown => "Scroll response down",
        Action::NextPane => "Next pane",
        Action::PrevPane => "Previous pane",
        Action::Generate => "Generate response",
        Action::Copy => "Copy response to clipboard",
        Action::Clear => "Clear everything",
        Action::Quit => "Quit",
        Action::Back => "Close overlay",
        Action::Help => "Toggle help",
    }
}

fn action_category(action: &Action) -> &'static str {
    match action {
        Action::Up
        | Action::Down
        | Action::PageUp
        | Action::PageDown
        | Action::NextPane
        | Action::PrevPane => "Navigation",

        Action::Generate | Action::Copy | Action::Clear => "Response",

        Action::Quit | Action::Back | Action::Help => "App",
    }
}

fn category_order(category: &str) -> u8 {
    match category {
        "Response" => 0,
        "Navigation" => 1,
        "App" => 2,
        _ => 99,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get(&ctrl_key('g')), Some(Action::Generate));
        assert_eq!(bindings.get(&ctrl_key('y')), Some(Action::Copy));
        assert_eq!(bindings.get(&ctrl_key('l')), Some(Action::Clear));
        assert_eq!(bindings.get(&ctrl_key('q')), Some(Action::Quit));
        assert_eq!(bindings.get(&key_code(KeyCode::F(1))), Some(Action::Help));
        assert_eq!(bindings.get(&key_code(KeyCode::Tab)), Some(Action::NextPane));
    }

    #[test]
    fn test_plain_characters_are_unbound() {
        let bindings = KeyBindings::new();
        for c in ['g', 'q', 'j', 'k', 'y', ' ', '.'] {
            let event = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            assert_eq!(bindings.get(&event), None, "'{}' should be typeable", c);
        }
    }

    #[test]
    fn test_all_bindings_sorted_by_category() {
        let entries = KeyBindings::new().all_bindings();
        assert_eq!(entries.first().unwrap().category, "Response");
        assert_eq!(entries.last().unwrap().category, "App");
        assert!(
            entries
                .iter()
                .any(|e| e.key == "Ctrl+G" && e.description == "Generate response")
        );
    }
}
