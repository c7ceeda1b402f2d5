//! Keyboard shortcut registry and key mapping.

use crate::ui::UiAction;
use winit::keyboard::{Key, NamedKey};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub action: UiAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, action: UiAction, description: &'static str) -> Self {
        Self {
            key,
            action,
            description,
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("1", UiAction::SelectMode(0), "Rect mode"),
            Shortcut::new("2", UiAction::SelectMode(1), "Circle mode"),
            Shortcut::new("3", UiAction::SelectMode(2), "Spline mode"),
            Shortcut::new("Escape", UiAction::ClearSelection, "Clear selection"),
            Shortcut::new("0", UiAction::ResetView, "Reset canvas view"),
            Shortcut::new("G", UiAction::CycleGrid, "Cycle canvas grid"),
        ]
    }

    /// Shortcut label for a rail index, if one exists.
    pub fn mode_key(index: usize) -> Option<&'static str> {
        Self::all()
            .into_iter()
            .find(|s| s.action == UiAction::SelectMode(index))
            .map(|s| s.key)
    }

    /// Map a pressed logical key to its action.
    pub fn action_for(key: &Key) -> Option<UiAction> {
        let name = match key {
            Key::Named(NamedKey::Escape) => "Escape",
            Key::Character(c) => c.as_str(),
            _ => return None,
        };
        Self::all()
            .into_iter()
            .find(|s| s.key.eq_ignore_ascii_case(name))
            .map(|s| s.action)
    }

    /// Log the shortcut list.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::info!("  {:8} {}", shortcut.key, shortcut.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_key(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn test_mode_keys() {
        assert_eq!(
            ShortcutRegistry::action_for(&char_key("1")),
            Some(UiAction::SelectMode(0))
        );
        assert_eq!(
            ShortcutRegistry::action_for(&char_key("3")),
            Some(UiAction::SelectMode(2))
        );
        assert_eq!(ShortcutRegistry::action_for(&char_key("4")), None);
    }

    #[test]
    fn test_named_and_case_insensitive() {
        assert_eq!(
            ShortcutRegistry::action_for(&Key::Named(NamedKey::Escape)),
            Some(UiAction::ClearSelection)
        );
        assert_eq!(
            ShortcutRegistry::action_for(&char_key("g")),
            Some(UiAction::CycleGrid)
        );
        assert_eq!(ShortcutRegistry::action_for(&Key::Named(NamedKey::Enter)), None);
    }

    #[test]
    fn test_mode_key_labels() {
        assert_eq!(ShortcutRegistry::mode_key(1), Some("2"));
        assert_eq!(ShortcutRegistry::mode_key(5), None);
    }
}
