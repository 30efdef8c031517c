use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use tracing::warn;

use crate::config::config::KeybindingConfig;

/// Everything a key press can ask the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    FocusSearch,
    AddItem,
    ExportCsv,
    Print,
    SortByColumn,
    ReverseSort,
    DeleteItem,
    NextRow,
    PreviousRow,
    NextColumn,
    PreviousColumn,
    DismissNotifications,
    Quit,
}

impl Action {
    /// Parse the snake_case names used in the config file
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "focus_search" => Some(Action::FocusSearch),
            "add_item" => Some(Action::AddItem),
            "export_csv" => Some(Action::ExportCsv),
            "print" => Some(Action::Print),
            "sort_by_column" => Some(Action::SortByColumn),
            "reverse_sort" => Some(Action::ReverseSort),
            "delete_item" => Some(Action::DeleteItem),
            "next_row" => Some(Action::NextRow),
            "previous_row" => Some(Action::PreviousRow),
            "next_column" => Some(Action::NextColumn),
            "previous_column" => Some(Action::PreviousColumn),
            "dismiss_notifications" => Some(Action::DismissNotifications),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Maps key events to actions. Defaults keep the two page-wide shortcuts
/// from the web version (Ctrl+S focuses search, Ctrl+A adds an item) and add
/// table-mode keys for the rest.
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, KeyModifiers), Action>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(
            (KeyCode::Char('s'), KeyModifiers::CONTROL),
            Action::FocusSearch,
        );
        bindings.insert(
            (KeyCode::Char('a'), KeyModifiers::CONTROL),
            Action::AddItem,
        );
        bindings.insert((KeyCode::Char('e'), KeyModifiers::NONE), Action::ExportCsv);
        bindings.insert((KeyCode::Char('p'), KeyModifiers::NONE), Action::Print);
        bindings.insert(
            (KeyCode::Char('s'), KeyModifiers::NONE),
            Action::SortByColumn,
        );
        bindings.insert((KeyCode::Char('r'), KeyModifiers::NONE), Action::ReverseSort);
        bindings.insert((KeyCode::Char('d'), KeyModifiers::NONE), Action::DeleteItem);
        bindings.insert((KeyCode::Delete, KeyModifiers::NONE), Action::DeleteItem);
        bindings.insert((KeyCode::Char('j'), KeyModifiers::NONE), Action::NextRow);
        bindings.insert((KeyCode::Down, KeyModifiers::NONE), Action::NextRow);
        bindings.insert((KeyCode::Char('k'), KeyModifiers::NONE), Action::PreviousRow);
        bindings.insert((KeyCode::Up, KeyModifiers::NONE), Action::PreviousRow);
        bindings.insert((KeyCode::Char('l'), KeyModifiers::NONE), Action::NextColumn);
        bindings.insert((KeyCode::Right, KeyModifiers::NONE), Action::NextColumn);
        bindings.insert(
            (KeyCode::Char('h'), KeyModifiers::NONE),
            Action::PreviousColumn,
        );
        bindings.insert((KeyCode::Left, KeyModifiers::NONE), Action::PreviousColumn);
        bindings.insert(
            (KeyCode::Char('x'), KeyModifiers::NONE),
            Action::DismissNotifications,
        );
        bindings.insert((KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit);

        Self { bindings }
    }

    /// Build bindings from config, overlaying custom mappings on the
    /// defaults. Unknown actions or unparseable keys are warned about and
    /// skipped.
    pub fn from_config(config: &KeybindingConfig) -> Self {
        let mut key_bindings = Self::new();

        if let Some(mappings) = &config.custom_mappings {
            for (action_name, key_spec) in mappings {
                match (Action::from_name(action_name), parse_key_spec(key_spec)) {
                    (Some(action), Some(key)) => {
                        key_bindings.bindings.insert(key, action);
                    }
                    _ => {
                        warn!(
                            "Ignoring key mapping {:?} = {:?}",
                            action_name, key_spec
                        );
                    }
                }
            }
        }

        key_bindings
    }

    /// Look up the action for a key event, if any
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        // Normalize: shifted chars arrive with the SHIFT modifier set
        let modifiers = key.modifiers & !KeyModifiers::SHIFT;
        self.bindings.get(&(key.code, modifiers)).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse key specs like "ctrl+s", "delete", "f"
fn parse_key_spec(spec: &str) -> Option<(KeyCode, KeyModifiers)> {
    let spec = spec.trim().to_lowercase();
    let (modifiers, key_part) = match spec.strip_prefix("ctrl+") {
        Some(rest) => (KeyModifiers::CONTROL, rest),
        None => (KeyModifiers::NONE, spec.as_str()),
    };

    let code = match key_part {
        "delete" | "del" => KeyCode::Delete,
        "esc" | "escape" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        k if k.chars().count() == 1 => KeyCode::Char(k.chars().next()?),
        _ => return None,
    };

    Some((code, modifiers))
}
