//! History pane
//!
//! Newest-first list of confirmed sends. Entries cannot be edited or
//! removed individually; the whole log can be exported as CSV or cleared
//! after confirmation.

use crate::action::Action;
use crate::component::Component;
use crate::model::history::{HistoryEntry, HistoryLog};
use crate::model::message::format_date;
use anyhow::Result;
use chrono::DateTime;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// History pane
#[derive(Default)]
pub struct HistoryPanelComponent {
    pub cursor_row: usize,
}

impl Component for HistoryPanelComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::PrevItem),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::NextItem),
            KeyCode::Char('x') => Some(Action::ExportCsv),
            KeyCode::Char('c') => Some(Action::OpenClearHistory),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the history log, so the App calls draw_with_history
        Ok(())
    }
}

impl HistoryPanelComponent {
    pub fn next(&mut self, history: &HistoryLog) {
        if !history.is_empty() && self.cursor_row + 1 < history.len() {
            self.cursor_row += 1;
        }
    }

    pub fn previous(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    pub fn clamp_cursor(&mut self, history: &HistoryLog) {
        if history.is_empty() {
            self.cursor_row = 0;
        } else if self.cursor_row >= history.len() {
            self.cursor_row = history.len() - 1;
        }
    }

    pub fn draw_with_history(
        &self,
        frame: &mut Frame,
        area: Rect,
        history: &HistoryLog,
        focused: bool,
    ) -> Result<()> {
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Historiku i Mesazheve ")
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let mut lines = Vec::new();
        if history.is_empty() {
            lines.push(Line::from("Nuk keni mesazhe të dërguar ende."));
            lines.push(Line::from(Span::styled(
                "Historiku do të shfaqet këtu pasi të regjistroni dërgimin e parë.",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            for (row, entry) in history.entries().iter().enumerate() {
                lines.extend(self.render_entry(row, entry, focused));
            }
        }

        // Three lines per entry; keep the cursor's entry visible
        let visible = area.height.saturating_sub(2) as usize;
        let offset = if visible == 0 || history.len() * 3 <= visible {
            0
        } else {
            (self.cursor_row * 3).saturating_sub(visible.saturating_sub(3)) as u16
        };

        let paragraph = Paragraph::new(lines).block(block).scroll((offset, 0));
        frame.render_widget(paragraph, area);
        Ok(())
    }

    fn render_entry(&self, row: usize, entry: &HistoryEntry, focused: bool) -> Vec<Line<'static>> {
        let on_row = focused && row == self.cursor_row;
        let marker = if on_row { "▶ " } else { "  " };

        let date = DateTime::parse_from_rfc3339(&entry.date)
            .map(|dt| format_date(dt.date_naive()))
            .unwrap_or_else(|_| entry.date.clone());

        let products = entry
            .products
            .iter()
            .map(HistoryEntry::product_summary)
            .collect::<Vec<_>>()
            .join(", ");
        let contacts = entry
            .contacts
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        vec![
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(
                    date,
                    if on_row {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    },
                ),
                Span::styled(
                    format!("  ({} kontakte)", entry.contacts.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(Span::styled(
                format!("    Produktet: {}", products),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format!("    Kontaktet: {}", contacts),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }
}
