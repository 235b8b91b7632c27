//! Single-field prompt dialog
//!
//! Used for naming a new subcategory or group and for entering the opening
//! balance.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{GroupId, Money, RowAddress, SectionId};
use crate::services::input::validate_name;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// What the prompt is asking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    AddSubCategory { section: SectionId, group: GroupId },
    AddGroup { section: SectionId },
    AddDirectGroup { section: SectionId },
    OpeningBalance,
}

impl PromptKind {
    fn title(&self) -> String {
        match self {
            Self::AddSubCategory { .. } => " Add Row ".to_string(),
            Self::AddGroup { section } => format!(" Add {} Group ", section.title()),
            Self::AddDirectGroup { section } => format!(" Add {} Value Group ", section.title()),
            Self::OpeningBalance => " Opening Balance ".to_string(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::OpeningBalance => "Amount",
            _ => "Name",
        }
    }
}

/// State for the prompt dialog
#[derive(Debug, Clone)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: TextInput,
    pub error_message: Option<String>,
}

impl Default for PromptState {
    fn default() -> Self {
        Self::new(PromptKind::OpeningBalance, String::new())
    }
}

impl PromptState {
    pub fn new(kind: PromptKind, initial: String) -> Self {
        let input = TextInput::new()
            .label(kind.label())
            .content(initial)
            .focused(true);
        Self {
            kind,
            input,
            error_message: None,
        }
    }

    /// Clear any error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the prompt dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(56, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(app.prompt.kind.title())
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Field
            Constraint::Length(1), // Target group
            Constraint::Length(1), // Error
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&app.prompt.input, chunks[0]);

    if let PromptKind::AddSubCategory { section, group } = &app.prompt.kind {
        let name = app
            .store
            .ledger()
            .section(*section)
            .group(group)
            .map_or(group.as_str(), |g| g.name.as_str());
        let line = Line::from(vec![
            Span::styled("Group: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                name.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [Tab] change", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }

    if let Some(ref error) = app.prompt.error_message {
        let error_line = Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)));
        frame.render_widget(Paragraph::new(error_line), chunks[2]);
    }

    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);
}

/// Handle key input for the prompt dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.prompt;

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
        }
        KeyCode::Enter => {
            if let Err(e) = save(app) {
                app.prompt.set_error(e);
            }
        }
        KeyCode::Backspace => {
            form.clear_error();
            form.input.backspace();
        }
        KeyCode::Delete => {
            form.clear_error();
            form.input.delete();
        }
        KeyCode::Tab | KeyCode::Down => {
            cycle_group(app, true);
        }
        KeyCode::BackTab | KeyCode::Up => {
            cycle_group(app, false);
        }
        KeyCode::Left => form.input.move_left(),
        KeyCode::Right => form.input.move_right(),
        KeyCode::Home => form.input.move_start(),
        KeyCode::End => form.input.move_end(),
        KeyCode::Char(c) => {
            form.clear_error();
            form.input.insert(c);
        }
        _ => return false,
    }
    true
}

/// Move an add-row prompt to the next or previous group of its section
fn cycle_group(app: &mut App, forward: bool) -> bool {
    let PromptKind::AddSubCategory { section, group } = &app.prompt.kind else {
        return false;
    };
    let (section, current) = (*section, group.clone());

    let groups = app.row_groups(section);
    let len = groups.len();
    if len < 2 {
        return false;
    }
    let index = groups.iter().position(|g| *g == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    app.prompt.kind = PromptKind::AddSubCategory {
        section,
        group: groups[next].clone(),
    };
    app.prompt.clear_error();
    true
}

/// Apply the prompt's value to the ledger
fn save(app: &mut App) -> Result<(), String> {
    let kind = app.prompt.kind.clone();
    let text = app.prompt.input.value().to_string();

    match kind {
        PromptKind::OpeningBalance => {
            let amount = Money::parse(text.trim()).map_err(|e| e.to_string())?;
            app.close_dialog();
            app.store.set_opening_balance(amount);
            app.set_status(format!("Opening balance set to {}", amount));
        }
        PromptKind::AddSubCategory { section, group } => {
            let name = validate_name(&text).map_err(|e| e.to_string())?;
            let id = app
                .store
                .add_sub_category(section, &group, &name)
                .ok_or_else(|| "Group no longer exists".to_string())?;
            app.close_dialog();
            app.focus_row_after_render(&RowAddress::new(section, group, Some(id)));
            app.set_status(format!("Added '{}'", name));
        }
        PromptKind::AddGroup { section } => {
            let name = validate_name(&text).map_err(|e| e.to_string())?;
            let group = app.store.add_category_group(section, &name);
            // An empty group has no cells to focus; ask for its first row
            app.open_prompt(PromptKind::AddSubCategory { section, group });
            app.set_status(format!("Added group '{}'", name));
        }
        PromptKind::AddDirectGroup { section } => {
            let name = validate_name(&text).map_err(|e| e.to_string())?;
            let group = app.store.add_direct_value_group(section, &name);
            app.close_dialog();
            app.focus_row_after_render(&RowAddress::new(section, group, None));
            app.set_status(format!("Added group '{}'", name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::LedgerStore;
    use crate::tui::app::ActiveDialog;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app() -> App {
        let mut app = App::new(LedgerStore::default(), Settings::default());
        app.after_render();
        app
    }

    #[test]
    fn test_add_sub_category_focuses_new_row() {
        let mut app = app();
        app.open_prompt(PromptKind::AddSubCategory {
            section: SectionId::Expenses,
            group: GroupId::new("operating"),
        });
        type_text(&mut app, "Rent");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.active_dialog, ActiveDialog::None);
        app.after_render();
        let row = app.focused_row().unwrap();
        assert_eq!(app.row_name(&row).as_deref(), Some("Rent"));
        assert_eq!(app.focus.focused().unwrap().col, 0);
    }

    #[test]
    fn test_blank_name_shows_error() {
        let mut app = app();
        app.open_prompt(PromptKind::AddGroup {
            section: SectionId::Income,
        });
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.active_dialog, ActiveDialog::Prompt);
        assert!(app.prompt.error_message.is_some());
    }

    #[test]
    fn test_add_group_chains_into_row_prompt() {
        let mut app = app();
        app.open_prompt(PromptKind::AddGroup {
            section: SectionId::Income,
        });
        type_text(&mut app, "Grants");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(
            app.prompt.kind,
            PromptKind::AddSubCategory { section: SectionId::Income, .. }
        ));
        assert_eq!(app.store.ledger().income.category_groups.len(), 3);
    }

    #[test]
    fn test_tab_cycles_target_group() {
        let mut app = app();
        app.store.add_direct_value_group(SectionId::Expenses, "Tax");
        app.open_prompt(PromptKind::AddSubCategory {
            section: SectionId::Expenses,
            group: GroupId::new("operating"),
        });

        press(&mut app, KeyCode::Tab);
        assert_eq!(
            app.prompt.kind,
            PromptKind::AddSubCategory {
                section: SectionId::Expenses,
                group: GroupId::new("salaries-wages"),
            }
        );
        // Direct-value groups are skipped
        press(&mut app, KeyCode::Tab);
        assert_eq!(
            app.prompt.kind,
            PromptKind::AddSubCategory {
                section: SectionId::Expenses,
                group: GroupId::new("operating"),
            }
        );
        press(&mut app, KeyCode::BackTab);
        assert_eq!(
            app.prompt.kind,
            PromptKind::AddSubCategory {
                section: SectionId::Expenses,
                group: GroupId::new("salaries-wages"),
            }
        );
    }

    #[test]
    fn test_opening_balance() {
        let mut app = app();
        app.open_prompt(PromptKind::OpeningBalance);
        press(&mut app, KeyCode::End);
        for _ in 0..4 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "-250.5");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.ledger().opening_balance, Money::from_cents(-25050));
        assert_eq!(
            app.store.balances()[11].closing_balance,
            Money::from_cents(-25050)
        );
    }

    #[test]
    fn test_direct_group_row_is_focusable() {
        let mut app = app();
        app.open_prompt(PromptKind::AddDirectGroup {
            section: SectionId::Income,
        });
        type_text(&mut app, "Grants");
        press(&mut app, KeyCode::Enter);
        app.after_render();

        let row = app.focused_row().unwrap();
        assert_eq!(row.sub_category, None);
        assert_eq!(app.row_name(&row).as_deref(), Some("Grants"));
    }
}
