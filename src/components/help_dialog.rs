//! Keyboard shortcut reference dialog

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

/// Help overlay listing every keybinding per pane
#[derive(Default)]
pub struct HelpDialog;

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 62, 22);
        frame.render_widget(Clear, popup_area);

        let section = |title: &str| -> Line<'static> {
            Line::from(Span::styled(
                format!(" {}", title),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
        };
        let binding = |keys: &str, what: &str| -> Line<'static> {
            Line::from(vec![
                Span::styled(format!("   {:<12}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(what.to_string()),
            ])
        };

        let content = vec![
            section("Globale"),
            binding("Tab/S-Tab", "Ndrysho panelin aktiv"),
            binding("?", "Kjo ndihmë"),
            binding("q", "Dil"),
            Line::from(""),
            section("Çmimet"),
            binding("↑↓ ←→", "Lëviz mes rreshtave dhe fushave"),
            binding("Enter", "Redakto fushën (Enter ruan, Esc anulon)"),
            binding("a / d", "Shto / hiq produkt"),
            Line::from(""),
            section("Kontaktet"),
            binding("Space", "Zgjidh / hiq kontaktin"),
            binding("a / d", "Shto / hiq kontakt"),
            binding("A / u", "Zgjidh të gjithë / hiq të gjithë"),
            Line::from(""),
            section("Preview / Historiku"),
            binding("y", "Kopjo mesazhin"),
            binding("x", "Eksporto (JSON në preview, CSV në historik)"),
            binding("s", "Regjistro dërgimin"),
            binding("c", "Pastro historikun"),
        ];

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Ndihmë ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
