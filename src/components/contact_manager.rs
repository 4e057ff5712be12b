//! Contact list pane
//!
//! Shows the persisted contacts with their selection checkboxes. Adding a
//! contact opens the AddContactDialog; every other mutation is emitted as
//! an Action and applied (and persisted) by the App.

use crate::action::Action;
use crate::component::Component;
use crate::model::contact::{Contact, ContactList};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Contacts pane
#[derive(Default)]
pub struct ContactManagerComponent {
    pub cursor_row: usize,
}

impl Component for ContactManagerComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::PrevItem),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::NextItem),
            KeyCode::Char(' ') => Some(Action::ToggleContact),
            KeyCode::Char('a') => Some(Action::OpenAddContact),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::RemoveContact),
            KeyCode::Char('A') => Some(Action::SelectAllContacts),
            KeyCode::Char('u') => Some(Action::ClearContactSelection),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the contact list, so the App calls draw_with_contacts
        Ok(())
    }
}

impl ContactManagerComponent {
    pub fn next(&mut self, contacts: &ContactList) {
        if !contacts.is_empty() && self.cursor_row + 1 < contacts.len() {
            self.cursor_row += 1;
        }
    }

    pub fn previous(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    pub fn clamp_cursor(&mut self, contacts: &ContactList) {
        if contacts.is_empty() {
            self.cursor_row = 0;
        } else if self.cursor_row >= contacts.len() {
            self.cursor_row = contacts.len() - 1;
        }
    }

    pub fn selected_id(&self, contacts: &ContactList) -> Option<String> {
        contacts.get(self.cursor_row).map(|c| c.id.clone())
    }

    pub fn draw_with_contacts(
        &self,
        frame: &mut Frame,
        area: Rect,
        contacts: &ContactList,
        focused: bool,
    ) -> Result<()> {
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let title = format!(" Kontaktet ({} të zgjedhur) ", contacts.selected_count());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let mut lines = Vec::new();
        if contacts.is_empty() {
            lines.push(Line::from("Nuk keni kontakte të ruajtura ende."));
            lines.push(Line::from("Shtypni 'a' për të shtuar kontaktin e parë."));
        } else {
            for (row, contact) in contacts.items().iter().enumerate() {
                lines.push(self.render_row(row, contact, focused));
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll_offset(area, contacts), 0));
        frame.render_widget(paragraph, area);
        Ok(())
    }

    fn scroll_offset(&self, area: Rect, contacts: &ContactList) -> u16 {
        let visible = area.height.saturating_sub(2) as usize;
        if visible == 0 || contacts.len() <= visible {
            return 0;
        }
        self.cursor_row.saturating_sub(visible - 1) as u16
    }

    fn render_row(&self, row: usize, contact: &Contact, focused: bool) -> Line<'static> {
        let on_row = focused && row == self.cursor_row;
        let marker = if on_row { "▶ " } else { "  " };
        let checkbox = if contact.selected { "[x] " } else { "[ ] " };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(
                checkbox,
                if contact.selected {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ),
            Span::styled(
                contact.name.clone(),
                if on_row {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                },
            ),
        ];
        if let Some(phone) = &contact.phone {
            spans.push(Span::styled(
                format!("  {}", phone),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}
