//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that delegates event handling and rendering to child
//! components. It owns all domain state (products, contacts, history) and
//! the injected key-value store; child components only hold presentation
//! state and talk to the App through Actions.
//!
//! Confirming a send calls the history log directly through this shared
//! owner; there is no process-wide registration slot.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, AddContactDialog, ConfirmDialog, ContactManagerComponent, HelpDialog,
    HistoryPanelComponent, MessagePreviewComponent, PriceFormComponent,
};
use crate::config::Config;
use crate::model::history::{ContactSnapshot, HistoryLog, ProductSnapshot, SendDraft};
use crate::model::message;
use crate::model::ui::{Modal, Pane};
use crate::model::{ContactList, ProductList};
use crate::services::{self, FileStore, KvStore};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{info, warn};

/// Ticks (at the 100ms tick rate) before a status message fades.
const STATUS_TICKS: u8 = 50;

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,

    /// Injected durable storage for contacts and history
    store: Box<dyn KvStore>,

    /// Domain state
    pub products: ProductList,
    pub contacts: ContactList,
    pub history: HistoryLog,

    /// Pane that currently receives input
    pub focus: Pane,

    /// Modal overlay, if any; only the modal receives input while open
    pub modal: Option<Modal>,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Transient status message and its remaining lifetime
    pub status_message: Option<String>,
    /// Transient error message, shown instead of the status
    pub error: Option<String>,
    message_ticks: u8,

    // ─────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────
    pub price_form: PriceFormComponent,
    pub contact_manager: ContactManagerComponent,
    pub preview: MessagePreviewComponent,
    pub history_panel: HistoryPanelComponent,
    pub confirm_dialog: ConfirmDialog,
    pub add_contact_dialog: AddContactDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    /// Create the App with file-backed storage in the configured data dir.
    pub fn new(config: Config) -> App {
        let store = Box::new(FileStore::new(config.data_dir.clone()));
        Self::with_store(config, store)
    }

    /// Create the App with an explicit store (in-memory in tests).
    pub fn with_store(config: Config, store: Box<dyn KvStore>) -> App {
        let contacts = ContactList::load(store.as_ref());
        let history = HistoryLog::load(store.as_ref());

        App {
            config,
            store,
            products: ProductList::seeded(),
            contacts,
            history,
            focus: Pane::Products,
            modal: None,
            should_quit: false,
            status_message: None,
            error: None,
            message_ticks: 0,
            price_form: PriceFormComponent::default(),
            contact_manager: ContactManagerComponent::default(),
            preview: MessagePreviewComponent::default(),
            history_panel: HistoryPanelComponent::default(),
            confirm_dialog: ConfirmDialog::default(),
            add_contact_dialog: AddContactDialog::default(),
            help_dialog: HelpDialog::default(),
        }
    }

    /// Message text for the current products and today's date.
    pub fn rendered_message(&self) -> String {
        message::compose(self.products.items(), Local::now().date_naive())
    }

    /// Send is allowed only with at least one valid product and one
    /// selected contact.
    pub fn can_send(&self) -> bool {
        !self.products.valid().is_empty() && self.contacts.selected_count() > 0
    }

    /// Snapshot of the current valid products, selected contacts, and
    /// rendered message. Used for both the JSON export and history append.
    fn snapshot(&self) -> SendDraft {
        SendDraft {
            date: Local::now().to_rfc3339(),
            products: self
                .products
                .valid()
                .into_iter()
                .map(|p| ProductSnapshot {
                    name: p.name.clone(),
                    price: p.price,
                    unit: p.unit.clone(),
                })
                .collect(),
            contacts: self
                .contacts
                .selected()
                .into_iter()
                .map(|c| ContactSnapshot {
                    name: c.name.clone(),
                    phone: c.phone.clone(),
                })
                .collect(),
            message: self.rendered_message(),
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.error = None;
        self.message_ticks = STATUS_TICKS;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.status_message = None;
        self.message_ticks = STATUS_TICKS;
    }

    /// Surface a persistence failure without leaving the UI.
    fn report_storage_error(&mut self, what: &str, result: Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "{} failed", what);
            self.set_error(format!("Gabim: {}", e));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl-C always quits, whatever is open
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        // An open modal captures all input
        if let Some(modal) = self.modal {
            return match modal {
                Modal::ConfirmQuit | Modal::ConfirmClearHistory => {
                    self.confirm_dialog.handle_key_event(key)
                }
                Modal::AddContact => self.add_contact_dialog.handle_key_event(key),
                Modal::Help => self.help_dialog.handle_key_event(key),
            };
        }

        // An active cell edit captures all input next
        if self.focus == Pane::Products && self.price_form.is_editing() {
            return Ok(self.price_form.handle_edit_key(key));
        }

        // Global keys, then the focused pane
        let action = match key.code {
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        if action.is_some() {
            return Ok(action);
        }

        match self.focus {
            Pane::Products => self.price_form.handle_key_event(key),
            Pane::Contacts => self.contact_manager.handle_key_event(key),
            Pane::Preview => self.preview.handle_key_event(key),
            Pane::History => self.history_panel.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.message_ticks > 0 {
                    self.message_ticks -= 1;
                    if self.message_ticks == 0 {
                        self.status_message = None;
                        self.error = None;
                    }
                }
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────
            // Focus & Navigation
            // ─────────────────────────────────────────────────────────────
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::NextItem => match self.focus {
                Pane::Products => self.price_form.next(&self.products),
                Pane::Contacts => self.contact_manager.next(&self.contacts),
                Pane::Preview => {
                    self.preview.update(Action::NextItem)?;
                }
                Pane::History => self.history_panel.next(&self.history),
            },
            Action::PrevItem => match self.focus {
                Pane::Products => self.price_form.previous(),
                Pane::Contacts => self.contact_manager.previous(),
                Pane::Preview => {
                    self.preview.update(Action::PrevItem)?;
                }
                Pane::History => self.history_panel.previous(),
            },
            Action::NextField => self.price_form.next_field(),
            Action::PrevField => self.price_form.prev_field(),

            // ─────────────────────────────────────────────────────────────
            // Inline Editing
            // ─────────────────────────────────────────────────────────────
            Action::BeginEdit => self.price_form.begin_edit(&self.products),
            Action::CommitEdit => {
                if let Some((id, field, value)) = self.price_form.commit_edit() {
                    self.products.update_field(&id, field, &value);
                }
            }
            Action::CancelEdit => self.price_form.cancel_edit(),
            Action::NextInput => {
                self.add_contact_dialog.update(Action::NextInput)?;
            }

            // ─────────────────────────────────────────────────────────────
            // Products
            // ─────────────────────────────────────────────────────────────
            Action::AddProduct => {
                self.products.add();
                self.price_form.cursor_row = self.products.len() - 1;
            }
            Action::RemoveProduct => {
                if let Some(id) = self.price_form.selected_id(&self.products) {
                    self.products.remove(&id);
                    self.price_form.clamp_cursor(&self.products);
                }
            }

            // ─────────────────────────────────────────────────────────────
            // Contacts
            // ─────────────────────────────────────────────────────────────
            Action::OpenAddContact => {
                self.add_contact_dialog.reset();
                self.modal = Some(Modal::AddContact);
            }
            Action::SubmitContact => {
                if self.add_contact_dialog.validate() {
                    let name = self.add_contact_dialog.name.clone();
                    let phone = self.add_contact_dialog.phone.clone();
                    let result = self.contacts.add(self.store.as_mut(), &name, &phone);
                    self.report_storage_error("adding contact", result);
                    self.modal = None;
                }
            }
            Action::RemoveContact => {
                if let Some(id) = self.contact_manager.selected_id(&self.contacts) {
                    let result = self.contacts.remove(self.store.as_mut(), &id);
                    self.report_storage_error("removing contact", result);
                    self.contact_manager.clamp_cursor(&self.contacts);
                }
            }
            Action::ToggleContact => {
                let current = self
                    .contacts
                    .get(self.contact_manager.cursor_row)
                    .map(|c| (c.id.clone(), c.selected));
                if let Some((id, selected)) = current {
                    let result = self.contacts.toggle(self.store.as_mut(), &id, !selected);
                    self.report_storage_error("toggling contact", result);
                }
            }
            Action::SelectAllContacts => {
                let result = self.contacts.toggle_all(self.store.as_mut(), true);
                self.report_storage_error("selecting all contacts", result);
            }
            Action::ClearContactSelection => {
                let result = self.contacts.toggle_all(self.store.as_mut(), false);
                self.report_storage_error("clearing contact selection", result);
            }

            // ─────────────────────────────────────────────────────────────
            // Composer
            // ─────────────────────────────────────────────────────────────
            Action::CopyMessage => {
                let message = self.rendered_message();
                match services::copy_to_clipboard(&message) {
                    Ok(()) => self.set_status("U kopjua! Mesazhi u kopjua në clipboard."),
                    Err(e) => {
                        warn!(error = %e, "clipboard copy failed");
                        self.set_error("Gabim: nuk u arrit të kopjohet mesazhi.");
                    }
                }
            }
            Action::ExportJson => {
                let draft = self.snapshot();
                let today = Local::now().date_naive();
                let result = serde_json::to_vec_pretty(&draft)
                    .map_err(anyhow::Error::from)
                    .and_then(|bytes| {
                        services::write_export(
                            std::path::Path::new(&self.config.export_dir),
                            &services::json_export_filename(today),
                            &bytes,
                        )
                    });
                match result {
                    Ok(path) => {
                        info!(path = %path.display(), "wrote json export");
                        self.set_status(format!("Eksportuar! {}", path.display()));
                    }
                    Err(e) => {
                        warn!(error = %e, "json export failed");
                        self.set_error(format!("Gabim: {}", e));
                    }
                }
            }
            Action::ConfirmSend => {
                if !self.can_send() {
                    self.set_error(
                        "Duhet të keni të paktën një produkt me çmim dhe një kontakt të zgjedhur.",
                    );
                } else {
                    let recipients = self.contacts.selected_count();
                    let draft = self.snapshot();
                    match self.history.append(self.store.as_mut(), draft) {
                        Ok(()) => {
                            self.history_panel.cursor_row = 0;
                            self.set_status(format!(
                                "U regjistrua! Mesazhi u regjistrua për {} kontakte.",
                                recipients
                            ));
                        }
                        Err(e) => {
                            warn!(error = %e, "recording send failed");
                            self.set_error(format!("Gabim: {}", e));
                        }
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────
            // History
            // ─────────────────────────────────────────────────────────────
            Action::ExportCsv => match self.history.to_csv() {
                Ok(None) => self.set_status("Nuk ka historik për të eksportuar."),
                Ok(Some(bytes)) => {
                    let today = Local::now().date_naive();
                    match services::write_export(
                        std::path::Path::new(&self.config.export_dir),
                        &services::csv_export_filename(today),
                        &bytes,
                    ) {
                        Ok(path) => {
                            info!(path = %path.display(), "wrote csv export");
                            self.set_status(format!("Eksportuar! {}", path.display()));
                        }
                        Err(e) => {
                            warn!(error = %e, "csv export failed");
                            self.set_error(format!("Gabim: {}", e));
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "csv rendering failed");
                    self.set_error(format!("Gabim: {}", e));
                }
            },
            Action::OpenClearHistory => {
                if self.history.is_empty() {
                    self.set_status("Historiku është bosh.");
                } else {
                    self.confirm_dialog.set_prompt(
                        "Pastro Historikun",
                        "Jeni i sigurt që doni të fshini të gjithë historikun?",
                    );
                    self.modal = Some(Modal::ConfirmClearHistory);
                }
            }

            // ─────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.confirm_dialog
                    .set_prompt("Dil", "Jeni i sigurt që doni të dilni?");
                self.modal = Some(Modal::ConfirmQuit);
            }
            Action::OpenHelp => {
                self.modal = Some(Modal::Help);
            }
            Action::CloseModal => {
                self.modal = None;
            }
            Action::ConfirmModal => match self.modal {
                Some(Modal::ConfirmQuit) => {
                    self.should_quit = true;
                }
                Some(Modal::ConfirmClearHistory) => {
                    match self.history.clear(self.store.as_mut()) {
                        Ok(()) => self.set_status("Historiku u pastrua."),
                        Err(e) => {
                            warn!(error = %e, "clearing history failed");
                            self.set_error(format!("Gabim: {}", e));
                        }
                    }
                    self.history_panel.clamp_cursor(&self.history);
                    self.modal = None;
                }
                _ => {
                    self.modal = None;
                }
            },
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let has_status = self.status_message.is_some() || self.error.is_some();
        let layout = calculate_main_layout(area, has_status);

        let message = self.rendered_message();
        let can_send = self.can_send();

        self.price_form
            .draw_with_products(frame, layout.products, &self.products, self.focus == Pane::Products)?;
        self.contact_manager.draw_with_contacts(
            frame,
            layout.contacts,
            &self.contacts,
            self.focus == Pane::Contacts,
        )?;
        self.preview.draw_with_message(
            frame,
            layout.preview,
            &message,
            &self.contacts,
            can_send,
            self.focus == Pane::Preview,
        )?;
        self.history_panel.draw_with_history(
            frame,
            layout.history,
            &self.history,
            self.focus == Pane::History,
        )?;

        if let Some(status_area) = layout.status {
            let (text, style) = if let Some(error) = &self.error {
                (error.clone(), Style::default().fg(Color::Red))
            } else {
                (
                    self.status_message.clone().unwrap_or_default(),
                    Style::default().fg(Color::Green),
                )
            };
            frame.render_widget(Paragraph::new(Span::styled(text, style)), status_area);
        }

        let hints = Line::from(vec![
            Span::styled(" Tab ", Style::default().fg(Color::Yellow)),
            Span::raw("panel  "),
            Span::styled(" ? ", Style::default().fg(Color::Yellow)),
            Span::raw("ndihmë  "),
            Span::styled(" q ", Style::default().fg(Color::Yellow)),
            Span::raw("dil"),
        ]);
        frame.render_widget(Paragraph::new(hints), layout.help);

        // Draw modal overlay if active
        match self.modal {
            Some(Modal::ConfirmQuit) | Some(Modal::ConfirmClearHistory) => {
                self.confirm_dialog.draw(frame, area)?;
            }
            Some(Modal::AddContact) => self.add_contact_dialog.draw(frame, area)?,
            Some(Modal::Help) => self.help_dialog.draw(frame, area)?,
            None => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::product::ProductField;
    use crate::services::MemoryStore;

    fn test_app() -> App {
        App::with_store(Config::default(), Box::new(MemoryStore::new()))
    }

    fn add_selected_contact(app: &mut App, name: &str) {
        app.add_contact_dialog.reset();
        app.add_contact_dialog.name = name.to_string();
        app.update(Action::SubmitContact).unwrap();
        let id = app.contacts.items().last().unwrap().id.clone();
        let store = app.store.as_mut();
        app.contacts.toggle(store, &id, true).unwrap();
    }

    #[test]
    fn test_confirm_send_appends_snapshot() {
        let mut app = test_app();
        app.products = ProductList::empty();
        app.products.add();
        app.products.update_field("1", ProductField::Name, "Apples");
        app.products.update_field("1", ProductField::Price, "120");
        add_selected_contact(&mut app, "Agim");

        assert!(app.can_send());
        app.update(Action::ConfirmSend).unwrap();

        assert_eq!(app.history.len(), 1);
        let entry = &app.history.entries()[0];
        assert_eq!(
            entry.products,
            vec![ProductSnapshot {
                name: "Apples".to_string(),
                price: 120.0,
                unit: "kg".to_string(),
            }]
        );
        assert_eq!(entry.contacts.len(), 1);
        assert_eq!(entry.contacts[0].name, "Agim");
        assert!(entry.message.contains("Apples: 120 L/kg"));

        // Contacts stay selected after a confirmed send
        assert_eq!(app.contacts.selected_count(), 1);
    }

    #[test]
    fn test_confirm_send_without_preconditions_is_rejected() {
        let mut app = test_app();
        add_selected_contact(&mut app, "Agim");

        // Seeded products all have price zero, so nothing is valid
        assert!(!app.can_send());
        app.update(Action::ConfirmSend).unwrap();
        assert!(app.history.is_empty());
        assert!(app.error.is_some());
    }

    #[test]
    fn test_send_after_stale_error_reports_success() {
        let mut app = test_app();
        add_selected_contact(&mut app, "Agim");

        // First attempt is rejected while no product is valid, leaving
        // the error message on screen
        app.update(Action::ConfirmSend).unwrap();
        assert!(app.error.is_some());

        app.products.update_field("1", ProductField::Price, "120");
        app.update(Action::ConfirmSend).unwrap();

        assert_eq!(app.history.len(), 1);
        assert!(app.error.is_none());
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("U regjistrua!"));
    }

    #[test]
    fn test_clear_history_after_stale_error_reports_success() {
        let mut app = test_app();
        app.products.update_field("1", ProductField::Price, "120");
        add_selected_contact(&mut app, "Agim");
        app.update(Action::ConfirmSend).unwrap();

        app.set_error("Gabim: i mëparshëm");
        app.update(Action::OpenClearHistory).unwrap();
        app.update(Action::ConfirmModal).unwrap();

        assert!(app.history.is_empty());
        assert!(app.error.is_none());
        assert_eq!(app.status_message.as_deref(), Some("Historiku u pastrua."));
    }

    #[test]
    fn test_history_snapshot_is_immune_to_later_edits() {
        let mut app = test_app();
        app.products.update_field("1", ProductField::Price, "120");
        add_selected_contact(&mut app, "Agim");
        app.update(Action::ConfirmSend).unwrap();

        app.products.update_field("1", ProductField::Price, "999");
        app.products.update_field("1", ProductField::Name, "Changed");

        let entry = &app.history.entries()[0];
        assert_eq!(entry.products[0].name, "Mollë");
        assert_eq!(entry.products[0].price, 120.0);
    }

    #[test]
    fn test_submit_contact_with_empty_name_keeps_dialog_open() {
        let mut app = test_app();
        app.update(Action::OpenAddContact).unwrap();
        app.update(Action::SubmitContact).unwrap();

        assert!(app.contacts.is_empty());
        assert_eq!(app.modal, Some(Modal::AddContact));
        assert!(app.add_contact_dialog.error.is_some());
    }

    #[test]
    fn test_clear_history_requires_confirmation() {
        let mut app = test_app();
        app.products.update_field("1", ProductField::Price, "120");
        add_selected_contact(&mut app, "Agim");
        app.update(Action::ConfirmSend).unwrap();

        app.update(Action::OpenClearHistory).unwrap();
        assert_eq!(app.modal, Some(Modal::ConfirmClearHistory));
        assert_eq!(app.history.len(), 1);

        app.update(Action::ConfirmModal).unwrap();
        assert!(app.history.is_empty());
        assert_eq!(app.modal, None);
    }
}
