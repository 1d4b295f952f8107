//! Terminal UI for the interactive estimator
//!
//! Form on the left, live breakdown on the right. Every key that changes an
//! input goes through `EstimatorSession::apply`, so the breakdown always
//! reflects the full current form.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::form::fields::FormField;
use crate::format::format_percent;
use crate::models::CommitmentTerm;
use crate::report::BreakdownReport;
use crate::session::{EstimatorSession, InputChange};

/// Application state for the interactive estimator
pub struct EstimatorApp {
    pub session: EstimatorSession,
    pub fields: Vec<FormField>,
    pub selected: usize,
    pub error_message: Option<String>,
}

impl EstimatorApp {
    pub fn new(session: EstimatorSession) -> Self {
        Self {
            session,
            fields: FormField::all(),
            selected: 0,
            error_message: None,
        }
    }

    pub fn selected_field(&self) -> FormField {
        self.fields[self.selected]
    }

    /// Handle keyboard input, returning true when the user asked to quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.checked_sub(1).unwrap_or(self.fields.len() - 1);
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selected = (self.selected + 1) % self.fields.len();
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => self.nudge(-1),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => self.nudge(1),
            KeyCode::Char('1') => self.apply(InputChange::SelectCommitment(CommitmentTerm::OneYear)),
            KeyCode::Char('2') => self.apply(InputChange::SelectCommitment(CommitmentTerm::TwoYears)),
            KeyCode::Char('3') => {
                self.apply(InputChange::SelectCommitment(CommitmentTerm::ThreeYears))
            }
            KeyCode::Char('5') => {
                self.apply(InputChange::SelectCommitment(CommitmentTerm::FiveYears))
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                let next = self.session.scenario().project.currency.next();
                self.apply(InputChange::Currency(next));
            }
            _ => {}
        }
        false
    }

    fn nudge(&mut self, direction: i32) {
        let change = self.selected_field().adjust(self.session.scenario(), direction);
        self.apply(change);
    }

    fn apply(&mut self, change: InputChange) {
        match self.session.apply(change) {
            Ok(_) => self.error_message = None,
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    /// Render the UI
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(10),   // Form + breakdown
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        self.render_header(f, chunks[0]);
        self.render_form(f, body[0]);
        self.render_breakdown(f, body[1]);
        self.render_footer(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let report = self.report();
        let selector = self.session.selector();

        let mut tiers = vec![Span::raw("Commitment: ")];
        for (term, discount) in selector.tiers() {
            let text = format!(" {} {} ", term, format_percent(discount));
            let style = if term == selector.selected() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            tiers.push(Span::styled(text, style));
            tiers.push(Span::raw(" "));
        }

        let title = vec![
            Line::from(vec![
                Span::styled(
                    "Project Cost Simulator",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  |  Grand Total: "),
                Span::styled(
                    report.grand_total.clone(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(tiers),
        ];

        let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let scenario = self.session.scenario();

        let header = Row::new(["Field", "Value"].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        }))
        .bottom_margin(1);

        let rows: Vec<Row> = self
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let row = Row::new(vec![
                    Cell::from(field.label()),
                    Cell::from(field.value(scenario)),
                ]);
                if idx == self.selected {
                    row.style(Style::default().fg(Color::Black).bg(Color::Cyan))
                } else {
                    row
                }
            })
            .collect();

        let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Inputs"))
            .column_spacing(1);

        f.render_widget(table, area);
    }

    fn render_breakdown(&self, f: &mut Frame, area: Rect) {
        let report = self.report();
        let label = Style::default().fg(Color::Cyan);
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::raw(format!(
                "{} work days, {} months",
                report.total_work_days, report.total_months
            ))),
            Line::from(""),
            Line::from(Span::styled("One-off Costs", bold)),
        ];
        for role in &report.roles {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", role.role), label),
                Span::raw(role.formatted.clone()),
            ]));
        }
        lines.extend([
            Line::from(vec![
                Span::styled("  Total One-off: ", label),
                Span::styled(report.money(report.one_off_total), bold),
            ]),
            Line::from(""),
            Line::from(Span::styled("Running Costs", bold)),
            Line::from(vec![
                Span::styled("  Licensing: ", label),
                Span::raw(format!(
                    "{} ({})",
                    report.money(report.license_cost),
                    report.license_mode
                )),
            ]),
            Line::from(vec![
                Span::styled("  Managed Service: ", label),
                Span::raw(report.money(report.managed_service_cost)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Subtotal: ", label),
                Span::styled(report.money(report.subtotal), bold),
            ]),
            Line::from(vec![
                Span::styled("Markup: ", label),
                Span::raw(format_percent(report.markup_percent)),
            ]),
            Line::from(vec![
                Span::styled("Discounts: ", label),
                Span::raw(format!("{:.1}%", report.combined_discount_percent)),
            ]),
        ]);

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Cost Breakdown"));
        f.render_widget(paragraph, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let content = match &self.error_message {
            Some(error) => Line::from(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(Span::styled(
                "↑/↓ select | ←/→ adjust | 1/2/3/5 commitment | c currency | q quit",
                Style::default().fg(Color::DarkGray),
            )),
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn report(&self) -> BreakdownReport {
        BreakdownReport::new(self.session.parameters(), self.session.result())
    }
}
