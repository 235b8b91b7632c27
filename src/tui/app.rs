//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! The ledger itself lives in the [`LedgerStore`]; the app only remembers
//! which cell is focused and which dialog is open.

use crate::config::Settings;
use crate::grid::{FocusRequest, FocusTracker};
use crate::models::{CellAddress, GroupId, Money, RowAddress, SectionId};
use crate::services::input::parse_cell_value;
use crate::services::LedgerStore;

use super::dialogs::cell_menu::CellMenuState;
use super::dialogs::period::PeriodFormState;
use super::dialogs::prompt::{PromptKind, PromptState};
use super::widgets::TextInput;

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the focused cell
    Editing,
}

/// Action waiting for a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteRow(RowAddress),
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Confirm(ConfirmAction),
    Prompt,
    Period,
    CellMenu,
}

/// Main application state
pub struct App {
    /// Owner of the ledger and its balances
    pub store: LedgerStore,

    /// Application settings
    pub settings: Settings,

    /// Focused cell and navigation grid
    pub focus: FocusTracker,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Current input mode
    pub input_mode: InputMode,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Text of the cell being edited
    pub cell_input: TextInput,

    /// Name / amount prompt state
    pub prompt: PromptState,

    /// Date range dialog state
    pub period_form: PeriodFormState,

    /// Cell action menu state
    pub cell_menu: CellMenuState,

    /// First month column shown in the grid
    pub column_offset: usize,

    /// Status message to display
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(store: LedgerStore, settings: Settings) -> Self {
        Self {
            store,
            settings,
            focus: FocusTracker::new(),
            should_quit: false,
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            cell_input: TextInput::numeric(),
            prompt: PromptState::default(),
            period_form: PeriodFormState::default(),
            cell_menu: CellMenuState::default(),
            column_offset: 0,
            status_message: None,
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Open a dialog, resetting its form
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match &dialog {
            ActiveDialog::Period => {
                self.period_form = PeriodFormState::from_period(&self.store.ledger().period);
            }
            ActiveDialog::CellMenu => self.cell_menu = CellMenuState::default(),
            _ => {}
        }
        self.active_dialog = dialog;
    }

    /// Open the name / amount prompt
    pub fn open_prompt(&mut self, kind: PromptKind) {
        let initial = match &kind {
            PromptKind::OpeningBalance => self.store.ledger().opening_balance.to_string(),
            _ => String::new(),
        };
        self.prompt = PromptState::new(kind, initial);
        self.active_dialog = ActiveDialog::Prompt;
    }

    /// Groups of `section` that take subcategory rows, in display order
    pub fn row_groups(&self, section: SectionId) -> Vec<GroupId> {
        self.store
            .ledger()
            .section(section)
            .category_groups
            .iter()
            .filter(|g| !g.is_direct())
            .map(|g| g.id.clone())
            .collect()
    }

    /// Open the add-row prompt for the focused row's group, else the first
    /// group of the focused section that takes rows
    pub fn open_add_row_prompt(&mut self) {
        let section = self.focused_section();
        let group = self
            .focused_row()
            .filter(|row| row.sub_category.is_some())
            .map(|row| row.group)
            .or_else(|| self.row_groups(section).into_iter().next());
        match group {
            Some(group) => self.open_prompt(PromptKind::AddSubCategory { section, group }),
            None => self.open_prompt(PromptKind::AddGroup { section }),
        }
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Ids of every editable cell, in display order
    pub fn cell_ids(&self) -> Vec<String> {
        self.store
            .cell_addresses()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Called once a frame has been drawn
    pub fn after_render(&mut self) {
        let ids = self.cell_ids();
        self.focus.on_render_complete(ids);
    }

    /// The focused cell, if any
    pub fn focused_cell(&self) -> Option<CellAddress> {
        self.focus.focused_id()?.parse().ok()
    }

    /// The row of the focused cell, if any
    pub fn focused_row(&self) -> Option<RowAddress> {
        self.focused_cell().map(|cell| cell.row)
    }

    /// Section of the focused cell, income when nothing is focused
    pub fn focused_section(&self) -> SectionId {
        self.focused_row().map_or(SectionId::Income, |row| row.section)
    }

    /// Focus a row's first month after the next render
    pub fn focus_row_after_render(&mut self, row: &RowAddress) {
        if let Some(first) = self.store.months().first() {
            self.focus
                .request_focus(FocusRequest::Cell(row.cell(*first).to_string()));
        }
    }

    /// Drop the highlight on rows added before the last key press
    pub fn acknowledge_new_rows(&mut self) {
        self.store.clear_new_flags();
    }

    /// Keep the focused month column inside the visible window
    pub fn ensure_column_visible(&mut self, visible: usize) {
        let Some(col) = self.focus.focused().map(|pos| pos.col) else {
            return;
        };
        let visible = visible.max(1);
        if col < self.column_offset {
            self.column_offset = col;
        } else if col >= self.column_offset + visible {
            self.column_offset = col + 1 - visible;
        }
        let months = self.store.months().len();
        self.column_offset = self.column_offset.min(months.saturating_sub(visible));
    }

    // === Cell editing ===

    /// Start editing the focused cell
    pub fn begin_edit(&mut self) {
        let Some(cell) = self.focused_cell() else {
            return;
        };
        let value = self.store.cell_value(&cell).unwrap_or_default();
        let text = if value.is_zero() {
            String::new()
        } else {
            value.to_string()
        };
        self.cell_input = TextInput::numeric().content(text).focused(true);
        self.input_mode = InputMode::Editing;
    }

    /// Start editing with pasted text as the new content
    pub fn begin_edit_with(&mut self, text: &str) {
        if self.focused_cell().is_none() {
            return;
        }
        self.cell_input = TextInput::numeric().focused(true);
        self.cell_input.insert_str(text);
        self.input_mode = InputMode::Editing;
    }

    /// Write the edited text into the focused cell
    pub fn commit_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        let Some(cell) = self.focused_cell() else {
            return;
        };
        let value = parse_cell_value(self.cell_input.value());
        if self.store.set_cell(&cell, value) {
            self.clear_status();
        }
        self.cell_input.clear();
    }

    /// Leave edit mode without changing the cell
    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        self.cell_input.clear();
    }

    // === Row actions ===

    /// Copy the focused cell's value into every month of its row
    pub fn apply_focused_to_all_months(&mut self) {
        let Some(cell) = self.focused_cell() else {
            return;
        };
        let value: Money = self.store.cell_value(&cell).unwrap_or_default();
        if self.store.apply_to_row(&cell.row, value) {
            self.set_status(format!("Applied {} to every month", value));
        }
    }

    /// Ask before deleting the focused row
    pub fn request_delete_row(&mut self) {
        match self.focused_row() {
            Some(row) if row.sub_category.is_some() => {
                self.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteRow(row)));
            }
            Some(_) => self.set_status("Group value rows cannot be deleted"),
            None => {}
        }
    }

    /// Run a confirmed action
    pub fn execute_confirmed(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteRow(row) => {
                let Some(sub_id) = &row.sub_category else {
                    return;
                };
                let name = self.row_name(&row).unwrap_or_default();
                if self
                    .store
                    .delete_sub_category(row.section, &row.group, sub_id)
                {
                    self.set_status(format!("Deleted '{}'", name));
                }
            }
        }
    }

    /// Display name of a row
    pub fn row_name(&self, row: &RowAddress) -> Option<String> {
        let group = self.store.ledger().section(row.section).group(&row.group)?;
        match &row.sub_category {
            Some(sub_id) => group.sub_category(sub_id).map(|sc| sc.name.clone()),
            None => Some(group.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupId, MonthKey, SubCategoryId};

    fn app() -> App {
        let mut app = App::new(LedgerStore::default(), Settings::default());
        app.after_render();
        app
    }

    fn sales_row() -> RowAddress {
        RowAddress::new(
            SectionId::Income,
            GroupId::new("revenue"),
            Some(SubCategoryId::new("sales")),
        )
    }

    #[test]
    fn test_first_cell_focused_after_first_render() {
        let app = app();
        let cell = app.focused_cell().unwrap();
        assert_eq!(cell.row.sub_category, Some(SubCategoryId::new("general-income")));
        assert_eq!(cell.month, MonthKey::new(2024, 1).unwrap());
    }

    #[test]
    fn test_edit_commit_updates_store() {
        let mut app = app();
        let cell = sales_row().cell(MonthKey::new(2024, 3).unwrap());
        app.focus.focus_id(&cell.to_string());

        app.begin_edit();
        assert_eq!(app.input_mode, InputMode::Editing);
        for c in "1e2-50".chars() {
            app.cell_input.insert(c);
        }
        app.commit_edit();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.cell_value(&cell), Some(Money::from_units(1250)));
        assert_eq!(app.store.balances()[2].income, Money::from_units(1250));
    }

    #[test]
    fn test_cancel_edit_keeps_value() {
        let mut app = app();
        app.begin_edit();
        app.cell_input.insert('9');
        app.cancel_edit();
        assert_eq!(app.store.revision(), 0);
    }

    #[test]
    fn test_delete_row_needs_confirmation() {
        let mut app = app();
        app.focus.focus_id(&sales_row().cell(MonthKey::new(2024, 1).unwrap()).to_string());

        app.request_delete_row();
        let ActiveDialog::Confirm(action) = app.active_dialog.clone() else {
            panic!("expected confirm dialog");
        };
        assert_eq!(app.store.row_addresses().len(), 11);

        app.close_dialog();
        app.execute_confirmed(action);
        assert_eq!(app.store.row_addresses().len(), 10);
        assert_eq!(app.status_message.as_deref(), Some("Deleted 'Sales'"));
    }

    #[test]
    fn test_apply_to_all_months() {
        let mut app = app();
        let jan = sales_row().cell(MonthKey::new(2024, 1).unwrap());
        app.store.set_cell(&jan, Money::from_units(75));
        app.focus.focus_id(&jan.to_string());

        app.apply_focused_to_all_months();
        let dec = sales_row().cell(MonthKey::new(2024, 12).unwrap());
        assert_eq!(app.store.cell_value(&dec), Some(Money::from_units(75)));
    }

    #[test]
    fn test_ensure_column_visible_scrolls() {
        let mut app = app();
        app.focus.focus_at(0, 7);
        app.ensure_column_visible(4);
        assert_eq!(app.column_offset, 4);

        app.focus.focus_at(0, 2);
        app.ensure_column_visible(4);
        assert_eq!(app.column_offset, 2);
    }

    #[test]
    fn test_paste_starts_sanitized_edit() {
        let mut app = app();
        app.begin_edit_with("-3e2");
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.cell_input.value(), "32");
    }
}
