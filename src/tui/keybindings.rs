//! Keybinding definitions
//!
//! Defines all keyboard shortcuts for different contexts

use crossterm::event::{KeyCode, KeyModifiers};

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    /// The key code
    pub key: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
    /// Description of what the key does
    pub description: &'static str,
    /// Context where this keybinding is active
    pub context: KeyContext,
}

/// Context in which a keybinding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Active everywhere outside dialogs
    Global,
    /// Moving around the grid
    Navigation,
    /// Changing the ledger
    Ledger,
    /// Typing into a cell
    Editing,
}

impl KeyContext {
    pub const ALL: [KeyContext; 4] = [
        KeyContext::Global,
        KeyContext::Navigation,
        KeyContext::Ledger,
        KeyContext::Editing,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Global => "Global Keys",
            Self::Navigation => "Navigation",
            Self::Ledger => "Ledger",
            Self::Editing => "Editing a Cell",
        }
    }
}

const fn binding(
    key: KeyCode,
    modifiers: KeyModifiers,
    description: &'static str,
    context: KeyContext,
) -> Keybinding {
    Keybinding {
        key,
        modifiers,
        description,
        context,
    }
}

/// All keybindings
pub static KEYBINDINGS: &[Keybinding] = &[
    // Global
    binding(KeyCode::Char('q'), KeyModifiers::NONE, "Quit", KeyContext::Global),
    binding(KeyCode::Char('?'), KeyModifiers::NONE, "Help", KeyContext::Global),
    // Navigation
    binding(KeyCode::Up, KeyModifiers::NONE, "Move up (k)", KeyContext::Navigation),
    binding(KeyCode::Down, KeyModifiers::NONE, "Move down (j)", KeyContext::Navigation),
    binding(KeyCode::Left, KeyModifiers::NONE, "Move left (h)", KeyContext::Navigation),
    binding(KeyCode::Right, KeyModifiers::NONE, "Move right (l)", KeyContext::Navigation),
    binding(KeyCode::Tab, KeyModifiers::NONE, "Next cell", KeyContext::Navigation),
    binding(KeyCode::BackTab, KeyModifiers::SHIFT, "Previous cell", KeyContext::Navigation),
    // Ledger
    binding(KeyCode::Enter, KeyModifiers::NONE, "Edit cell", KeyContext::Ledger),
    binding(KeyCode::Char('a'), KeyModifiers::NONE, "Add row (Tab picks group)", KeyContext::Ledger),
    binding(KeyCode::Char('g'), KeyModifiers::NONE, "Add group", KeyContext::Ledger),
    binding(
        KeyCode::Char('G'),
        KeyModifiers::SHIFT,
        "Add value group",
        KeyContext::Ledger,
    ),
    binding(KeyCode::Char('d'), KeyModifiers::NONE, "Delete row", KeyContext::Ledger),
    binding(KeyCode::Char('m'), KeyModifiers::NONE, "Cell menu", KeyContext::Ledger),
    binding(KeyCode::Char('r'), KeyModifiers::NONE, "Date range", KeyContext::Ledger),
    binding(KeyCode::Char('o'), KeyModifiers::NONE, "Opening balance", KeyContext::Ledger),
    // Editing
    binding(KeyCode::Enter, KeyModifiers::NONE, "Save value", KeyContext::Editing),
    binding(KeyCode::Tab, KeyModifiers::NONE, "Save and next cell", KeyContext::Editing),
    binding(KeyCode::Esc, KeyModifiers::NONE, "Cancel", KeyContext::Editing),
];

/// Get keybindings for a specific context
pub fn get_keybindings(context: KeyContext) -> Vec<&'static Keybinding> {
    KEYBINDINGS
        .iter()
        .filter(|kb| kb.context == context)
        .collect()
}

/// Format a keybinding for display
pub fn format_keybinding(kb: &Keybinding) -> String {
    let mut parts = Vec::new();

    if kb.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if kb.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    // Only show Shift for non-character keys
    if kb.modifiers.contains(KeyModifiers::SHIFT) && !matches!(kb.key, KeyCode::Char(_)) {
        parts.push("Shift".to_string());
    }

    let key_str = match kb.key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        _ => format!("{:?}", kb.key),
    };

    parts.push(key_str);
    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_context_has_bindings() {
        for context in KeyContext::ALL {
            assert!(!get_keybindings(context).is_empty(), "{:?}", context);
        }
    }

    #[test]
    fn test_format_keybinding() {
        let back_tab = KEYBINDINGS
            .iter()
            .find(|kb| kb.key == KeyCode::BackTab)
            .unwrap();
        assert_eq!(format_keybinding(back_tab), "Shift+Tab");

        let add_value_group = KEYBINDINGS
            .iter()
            .find(|kb| kb.key == KeyCode::Char('G'))
            .unwrap();
        assert_eq!(format_keybinding(add_value_group), "G");
    }
}
