//! Message preview pane
//!
//! Renders the message text exactly as it will be copied, plus the
//! recipient chips and the three actions: copy, JSON export, confirm
//! send. The text itself is composed by the App on every draw; this
//! component only owns the scroll position.

use crate::action::Action;
use crate::component::Component;
use crate::model::contact::ContactList;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Preview pane
#[derive(Default)]
pub struct MessagePreviewComponent {
    pub scroll: u16,
}

impl Component for MessagePreviewComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::PrevItem),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::NextItem),
            KeyCode::Char('y') => Some(Action::CopyMessage),
            KeyCode::Char('x') => Some(Action::ExportJson),
            KeyCode::Char('s') => Some(Action::ConfirmSend),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::PrevItem => self.scroll = self.scroll.saturating_sub(1),
            Action::NextItem => self.scroll = self.scroll.saturating_add(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the rendered message, so the App calls draw_with_message
        Ok(())
    }
}

impl MessagePreviewComponent {
    pub fn draw_with_message(
        &self,
        frame: &mut Frame,
        area: Rect,
        message: &str,
        contacts: &ContactList,
        can_send: bool,
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
            .title(" Preview Mesazhi ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));

        let mut lines: Vec<Line> = message.lines().map(|l| Line::from(l.to_string())).collect();

        lines.push(Line::from(""));
        let selected = contacts.selected();
        if selected.is_empty() {
            lines.push(Line::from(Span::styled(
                "Zgjidhni të paktën një kontakt për të vazhduar.",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("Marrës ({} kontakte):", selected.len()),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            let names = selected
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(Line::from(Span::styled(
                names,
                Style::default().fg(Color::Green),
            )));
        }

        lines.push(Line::from(""));
        let send_style = if can_send {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::styled(" y ", Style::default().fg(Color::Yellow)),
            Span::raw("Kopjo  "),
            Span::styled(" x ", Style::default().fg(Color::Yellow)),
            Span::raw("Eksporto JSON  "),
            Span::styled(" s ", send_style),
            Span::styled("Regjistro Dërgimin", send_style),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
        Ok(())
    }
}
