//! New-contact form dialog
//!
//! Two inputs: name (required) and phone (optional). Tab switches between
//! them, Enter submits, Esc cancels. An empty name is rejected with an
//! inline error; the trimming itself happens in the contact list.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Input field of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormInput {
    Name,
    Phone,
}

/// Add-contact dialog
pub struct AddContactDialog {
    pub name: String,
    pub phone: String,
    active: FormInput,
    pub error: Option<String>,
}

impl Default for AddContactDialog {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            active: FormInput::Name,
            error: None,
        }
    }
}

impl AddContactDialog {
    /// Reset the form when the modal opens.
    pub fn reset(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.active = FormInput::Name;
        self.error = None;
    }

    fn active_input(&mut self) -> &mut String {
        match self.active {
            FormInput::Name => &mut self.name,
            FormInput::Phone => &mut self.phone,
        }
    }

    /// Validate before submitting; sets the inline error on failure.
    pub fn validate(&mut self) -> bool {
        if self.name.trim().is_empty() {
            self.error = Some("Emri është i detyrueshëm.".to_string());
            false
        } else {
            self.error = None;
            true
        }
    }
}

impl Component for AddContactDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SubmitContact),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                Some(Action::NextInput)
            }
            KeyCode::Backspace => {
                self.active_input().pop();
                None
            }
            KeyCode::Char(c) => {
                self.active_input().push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::NextInput {
            self.active = match self.active {
                FormInput::Name => FormInput::Phone,
                FormInput::Phone => FormInput::Name,
            };
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 52, 11);

        frame.render_widget(Clear, popup_area);

        let input_line = |label: &str, value: &str, active: bool| -> Line<'static> {
            let style = if active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let cursor = if active { "▏" } else { "" };
            Line::from(vec![
                Span::styled(format!(" {:<20}", label), style),
                Span::raw(format!("{}{}", value, cursor)),
            ])
        };

        let mut content = vec![
            Line::from(""),
            input_line("Emri", &self.name, self.active == FormInput::Name),
            Line::from(""),
            input_line(
                "Telefoni (opsional)",
                &self.phone,
                self.active == FormInput::Phone,
            ),
            Line::from(""),
        ];

        if let Some(error) = &self.error {
            content.push(Line::from(Span::styled(
                format!(" {}", error),
                Style::default().fg(Color::Red),
            )));
        } else {
            content.push(Line::from(""));
        }

        content.push(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Green)),
            Span::raw("Shto  "),
            Span::styled(" Tab ", Style::default().fg(Color::Yellow)),
            Span::raw("Fusha tjetër  "),
            Span::styled(" Esc ", Style::default().fg(Color::Red)),
            Span::raw("Anulo"),
        ]));

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Shto Kontakt të Ri ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
