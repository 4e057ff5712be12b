//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `ProductList` - the editable daily price rows
//! - `ContactList` - the persisted, selectable recipients
//! - `HistoryLog` - immutable snapshots of confirmed sends
//! - `message` - pure composition of the outgoing text
//! - `ui` - pane focus and modal overlay state

pub mod contact;
pub mod history;
pub mod message;
pub mod product;
pub mod ui;

// Re-export commonly used types
pub use contact::{Contact, ContactList};
pub use history::{ContactSnapshot, HistoryEntry, HistoryLog, ProductSnapshot, SendDraft};
pub use product::{Product, ProductField, ProductList};
pub use ui::{Modal, Pane};
