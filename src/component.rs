//! Component trait - Interface for UI components
//!
//! Each component encapsulates its own presentation state, event handling,
//! and rendering logic. Components communicate through Actions rather than
//! direct state mutation; domain state lives in the root App and is passed
//! into draw methods by reference.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// The pattern follows:
/// 1. `handle_key_event` - Convert key events into semantic Actions
/// 2. `update` - Process Actions that concern this component
/// 3. `draw` - Render the component
pub trait Component {
    /// Handle a key event, returning an optional Action.
    ///
    /// Components may mutate their own input buffers here, but shared
    /// state changes always go through the returned Action.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Update component state based on an Action. May return a follow-up
    /// Action (e.g. confirming a form may close the modal).
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Draw the component to the frame. Pure rendering, no state changes.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
