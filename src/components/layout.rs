//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas: two columns of two panes, plus an optional
/// status line and the key hint bar.
pub struct MainLayout {
    pub products: Rect,
    pub contacts: Rect,
    pub preview: Rect,
    pub history: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the main screen layout
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    let main_chunks = if has_status {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area)
    };

    // Left column: products and contacts; right column: preview and history
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);

    let (status_area, help_area) = if has_status {
        (Some(main_chunks[1]), main_chunks[2])
    } else {
        (None, main_chunks[1])
    };

    MainLayout {
        products: left[0],
        contacts: left[1],
        preview: right[0],
        history: right[1],
        status: status_area,
        help: help_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panes_cover_the_content_area() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = calculate_main_layout(area, true);
        assert!(layout.products.width > 0 && layout.products.height > 0);
        assert!(layout.history.width > 0 && layout.history.height > 0);
        assert!(layout.status.is_some());
        assert_eq!(layout.help.height, 1);
    }

    #[test]
    fn test_centered_popup_is_clamped_to_the_area() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = centered_popup(area, 60, 20);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }
}
