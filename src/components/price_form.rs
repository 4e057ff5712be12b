//! Product price form component
//!
//! Editable table of the day's products. Rows are navigated with the
//! cursor, individual cells are edited inline through a small input
//! buffer, and every committed edit flows through an Action into the
//! product list owned by the App.

use crate::action::Action;
use crate::component::Component;
use crate::model::message::format_price;
use crate::model::product::{Product, ProductField, ProductList};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Price form pane
pub struct PriceFormComponent {
    /// Row under the cursor
    pub cursor_row: usize,
    /// Field under the cursor
    pub cursor_field: ProductField,
    /// Active inline edit buffer, None when not editing
    edit_buffer: Option<String>,
    /// Id of the row being edited, captured at edit start
    edit_id: Option<String>,
}

impl Default for PriceFormComponent {
    fn default() -> Self {
        Self {
            cursor_row: 0,
            cursor_field: ProductField::Name,
            edit_buffer: None,
            edit_id: None,
        }
    }
}

impl Component for PriceFormComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::PrevItem),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::NextItem),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevField),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::NextField),
            KeyCode::Enter => Some(Action::BeginEdit),
            KeyCode::Char('a') => Some(Action::AddProduct),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::RemoveProduct),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the product list, so the App calls draw_with_products
        Ok(())
    }
}

impl PriceFormComponent {
    pub fn is_editing(&self) -> bool {
        self.edit_buffer.is_some()
    }

    /// Route keys into the edit buffer while a cell edit is active.
    pub fn handle_edit_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => Some(Action::CommitEdit),
            KeyCode::Esc => Some(Action::CancelEdit),
            KeyCode::Backspace => {
                if let Some(buffer) = &mut self.edit_buffer {
                    buffer.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = &mut self.edit_buffer {
                    buffer.push(c);
                }
                None
            }
            _ => None,
        }
    }

    pub fn next(&mut self, products: &ProductList) {
        if !products.is_empty() && self.cursor_row + 1 < products.len() {
            self.cursor_row += 1;
        }
    }

    pub fn previous(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    pub fn next_field(&mut self) {
        self.cursor_field = match self.cursor_field {
            ProductField::Name => ProductField::Price,
            ProductField::Price => ProductField::Unit,
            ProductField::Unit => ProductField::Name,
        };
    }

    pub fn prev_field(&mut self) {
        self.cursor_field = match self.cursor_field {
            ProductField::Name => ProductField::Unit,
            ProductField::Price => ProductField::Name,
            ProductField::Unit => ProductField::Price,
        };
    }

    /// Keep the cursor on a real row after removals.
    pub fn clamp_cursor(&mut self, products: &ProductList) {
        if products.is_empty() {
            self.cursor_row = 0;
        } else if self.cursor_row >= products.len() {
            self.cursor_row = products.len() - 1;
        }
    }

    pub fn selected_id(&self, products: &ProductList) -> Option<String> {
        products.get(self.cursor_row).map(|p| p.id.clone())
    }

    /// Start editing the cell under the cursor, prefilled with its value.
    pub fn begin_edit(&mut self, products: &ProductList) {
        if let Some(product) = products.get(self.cursor_row) {
            let value = match self.cursor_field {
                ProductField::Name => product.name.clone(),
                ProductField::Price => format_price(product.price),
                ProductField::Unit => product.unit.clone(),
            };
            self.edit_buffer = Some(value);
            self.edit_id = Some(product.id.clone());
        }
    }

    /// Take the finished edit: (row id, field, raw value).
    pub fn commit_edit(&mut self) -> Option<(String, ProductField, String)> {
        let value = self.edit_buffer.take()?;
        let id = self.edit_id.take()?;
        Some((id, self.cursor_field, value))
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer = None;
        self.edit_id = None;
    }

    pub fn draw_with_products(
        &self,
        frame: &mut Frame,
        area: Rect,
        products: &ProductList,
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
            .title(" Çmimet e Ditës ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));

        let mut lines = vec![Self::header_line()];
        for (row, product) in products.items().iter().enumerate() {
            lines.push(self.render_row(row, product, focused));
        }
        if products.is_empty() {
            lines.push(Line::from("Nuk ka produkte. Shtypni 'a' për të shtuar."));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll_offset(area, products), 0));
        frame.render_widget(paragraph, area);
        Ok(())
    }

    /// Column labels above the rows.
    fn header_line() -> Line<'static> {
        let [name, price, unit] = ProductField::all();
        let style = Style::default().fg(Color::DarkGray);
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<16}", name.label()), style),
            Span::raw("  "),
            Span::styled(format!("{:>8}", price.label()), style),
            Span::raw("   "),
            Span::styled(unit.label().to_string(), style),
        ])
    }

    /// Keep the cursor row inside the visible window of the pane. The
    /// header occupies the first line.
    fn scroll_offset(&self, area: Rect, products: &ProductList) -> u16 {
        let visible = area.height.saturating_sub(2) as usize;
        if visible == 0 || products.len() + 1 <= visible {
            return 0;
        }
        (self.cursor_row + 1).saturating_sub(visible - 1) as u16
    }

    fn render_row(&self, row: usize, product: &Product, focused: bool) -> Line<'static> {
        let on_row = focused && row == self.cursor_row;

        let cell = |field: ProductField, text: String| -> Span<'static> {
            let active = on_row && field == self.cursor_field;
            if active && self.is_editing() {
                Span::styled(
                    format!("{}▏", self.edit_buffer.as_deref().unwrap_or("")),
                    Style::default().fg(Color::Black).bg(Color::Yellow),
                )
            } else if active {
                Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )
            } else {
                Span::raw(text)
            }
        };

        let marker = if on_row { "▶ " } else { "  " };
        let name = if product.name.is_empty() {
            "(pa emër)".to_string()
        } else {
            product.name.clone()
        };

        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            cell(ProductField::Name, format!("{:<16}", name)),
            Span::raw("  "),
            cell(ProductField::Price, format!("{:>8}", format_price(product.price))),
            Span::raw(" L/"),
            cell(ProductField::Unit, product.unit.clone()),
        ])
    }
}
