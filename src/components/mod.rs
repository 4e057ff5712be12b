//! UI Components
//!
//! Each component encapsulates its own presentation state, event handling,
//! and rendering logic. Components communicate through Actions rather than
//! direct state mutation.

pub mod add_contact_dialog;
pub mod confirm_dialog;
pub mod contact_manager;
pub mod help_dialog;
pub mod history_panel;
pub mod layout;
pub mod message_preview;
pub mod price_form;

pub use add_contact_dialog::AddContactDialog;
pub use confirm_dialog::ConfirmDialog;
pub use contact_manager::ContactManagerComponent;
pub use help_dialog::HelpDialog;
pub use history_panel::HistoryPanelComponent;
pub use layout::{calculate_main_layout, centered_popup, MainLayout};
pub use message_preview::MessagePreviewComponent;
pub use price_form::PriceFormComponent;
