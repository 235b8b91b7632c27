//! Date range dialog
//!
//! Edits the first and last month of the ledger. Values in months that stay
//! inside the new range are kept.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{BudgetPeriod, MonthKey};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Which field is focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodField {
    #[default]
    Start,
    End,
}

/// State for the date range dialog
#[derive(Debug, Clone, Default)]
pub struct PeriodFormState {
    pub start_input: TextInput,
    pub end_input: TextInput,
    pub focused_field: PeriodField,
    pub error_message: Option<String>,
}

fn month_text(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

impl PeriodFormState {
    /// Prefill the form from the current period
    pub fn from_period(period: &BudgetPeriod) -> Self {
        Self {
            start_input: TextInput::new()
                .label("Start")
                .placeholder("YYYY-MM")
                .content(month_text(period.start_month()))
                .focused(true),
            end_input: TextInput::new()
                .label("End  ")
                .placeholder("YYYY-MM")
                .content(month_text(period.end_month())),
            focused_field: PeriodField::Start,
            error_message: None,
        }
    }

    /// Switch between the start and end fields
    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            PeriodField::Start => PeriodField::End,
            PeriodField::End => PeriodField::Start,
        };
        self.start_input.focused = self.focused_field == PeriodField::Start;
        self.end_input.focused = self.focused_field == PeriodField::End;
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            PeriodField::Start => &mut self.start_input,
            PeriodField::End => &mut self.end_input,
        }
    }

    /// Parse both fields into a period
    pub fn build_period(&self) -> Result<BudgetPeriod, String> {
        let start: MonthKey = self
            .start_input
            .value()
            .parse()
            .map_err(|_| "Start must look like 2024-01".to_string())?;
        let end: MonthKey = self
            .end_input
            .value()
            .parse()
            .map_err(|_| "End must look like 2024-12".to_string())?;
        BudgetPeriod::between(start, end).map_err(|e| e.to_string())
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Render the date range dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(44, 8, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Date Range ")
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
            Constraint::Length(1), // Start
            Constraint::Length(1), // End
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.period_form;
    frame.render_widget(&form.start_input, chunks[0]);
    frame.render_widget(&form.end_input, chunks[1]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[3],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Apply  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[4]);
}

/// Handle key input for the date range dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let form = &mut app.period_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.next_field(),
        KeyCode::Enter => match form.build_period() {
            Ok(period) => {
                app.close_dialog();
                if app.store.set_period(period) {
                    app.set_status(format!("Range set to {}", period));
                }
            }
            Err(e) => form.error_message = Some(e),
        },
        KeyCode::Backspace => {
            form.clear_error();
            form.focused_input().backspace();
        }
        KeyCode::Delete => {
            form.clear_error();
            form.focused_input().delete();
        }
        KeyCode::Left => form.focused_input().move_left(),
        KeyCode::Right => form.focused_input().move_right(),
        KeyCode::Char(c) => {
            form.clear_error();
            form.focused_input().insert(c);
        }
        _ => return false,
    }
    true
}
