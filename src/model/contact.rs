//! Contact list state and persistence
//!
//! Contacts survive across sessions: every mutation writes the full list
//! back to the store under a fixed key before the UI observes the change.

use crate::services::storage::KvStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key for the serialized contact list.
pub const CONTACTS_KEY: &str = "viber-contacts";

/// A message recipient. Phone is optional and stored as absent when blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub selected: bool,
}

/// Ordered, persisted list of contacts.
#[derive(Debug)]
pub struct ContactList {
    items: Vec<Contact>,
    next_id: u64,
}

impl Default for ContactList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl ContactList {
    /// Load the persisted list. An absent key or malformed JSON yields an
    /// empty list with a logged diagnostic; neither is a user-facing error.
    pub fn load(store: &dyn KvStore) -> Self {
        let raw = match store.get(CONTACTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(error = %e, "failed to read stored contacts, starting empty");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<Contact>>(&raw) {
            Ok(items) => {
                let next_id = fresh_id_after(items.iter().map(|c| c.id.as_str()));
                Self { items, next_id }
            }
            Err(e) => {
                warn!(error = %e, "failed to parse stored contacts, starting empty");
                Self::default()
            }
        }
    }

    pub fn items(&self) -> &[Contact] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.items.get(index)
    }

    /// Contacts currently ticked to receive the message.
    pub fn selected(&self) -> Vec<&Contact> {
        self.items.iter().filter(|c| c.selected).collect()
    }

    /// Derived selection count; never stored.
    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|c| c.selected).count()
    }

    /// Add a contact. No-op when the trimmed name is empty; a blank phone
    /// is stored as absent. New contacts start unselected.
    pub fn add(&mut self, store: &mut dyn KvStore, name: &str, phone: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        let phone = phone.trim();
        self.items.push(Contact {
            id: self.next_id.to_string(),
            name: name.to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            selected: false,
        });
        self.next_id += 1;
        self.save(store)
    }

    /// Remove the contact with the given id; no-op if absent.
    pub fn remove(&mut self, store: &mut dyn KvStore, id: &str) -> Result<()> {
        self.items.retain(|c| c.id != id);
        self.save(store)
    }

    /// Set the selection flag of one contact.
    pub fn toggle(&mut self, store: &mut dyn KvStore, id: &str, selected: bool) -> Result<()> {
        if let Some(contact) = self.items.iter_mut().find(|c| c.id == id) {
            contact.selected = selected;
        }
        self.save(store)
    }

    /// Set the selection flag of every contact ("select all" / "clear all").
    pub fn toggle_all(&mut self, store: &mut dyn KvStore, selected: bool) -> Result<()> {
        for contact in &mut self.items {
            contact.selected = selected;
        }
        self.save(store)
    }

    fn save(&self, store: &mut dyn KvStore) -> Result<()> {
        let json = serde_json::to_string(&self.items)?;
        store.set(CONTACTS_KEY, &json)
    }
}

/// Next counter value that cannot collide with any existing numeric id.
fn fresh_id_after<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(|id| id.parse::<u64>().ok())
        .max()
        .map(|max| max + 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStore;

    #[test]
    fn test_first_id_in_empty_store_is_one() {
        let mut store = MemoryStore::new();
        let mut list = ContactList::load(&store);
        list.add(&mut store, "Agim", "").unwrap();
        assert_eq!(list.items()[0].id, "1");
    }

    #[test]
    fn test_add_trims_and_persists() {
        let mut store = MemoryStore::new();
        let mut list = ContactList::load(&store);
        list.add(&mut store, "  Agim  ", " +355 69 123 4567 ").unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].name, "Agim");
        assert_eq!(list.items()[0].phone.as_deref(), Some("+355 69 123 4567"));
        assert!(!list.items()[0].selected);
        assert!(store.get(CONTACTS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_add_empty_name_is_noop() {
        let mut store = MemoryStore::new();
        let mut list = ContactList::load(&store);
        list.add(&mut store, "   ", "123").unwrap();
        assert!(list.is_empty());
        // Nothing gets written for a rejected add either
        assert_eq!(store.get(CONTACTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_blank_phone_stored_as_absent() {
        let mut store = MemoryStore::new();
        let mut list = ContactList::load(&store);
        list.add(&mut store, "Drita", "   ").unwrap();
        assert_eq!(list.items()[0].phone, None);

        let json = store.get(CONTACTS_KEY).unwrap().unwrap();
        assert!(!json.contains("phone"));
    }

    #[test]
    fn test_round_trip_preserves_order_and_ids() {
        let mut store = MemoryStore::new();
        let mut list = ContactList::load(&store);
        list.add(&mut store, "Agim", "").unwrap();
        list.add(&mut store, "Drita", "069").unwrap();
        list.toggle(&mut store, "2", true).unwrap();

        let reloaded = ContactList::load(&store);
        assert_eq!(reloaded.items(), list.items());

        // Fresh ids after reload do not collide with persisted ones
        let mut reloaded = reloaded;
        reloaded.add(&mut store, "Besa", "").unwrap();
        assert_eq!(reloaded.items().last().unwrap().id, "3");
    }

    #[test]
    fn test_malformed_stored_json_yields_empty_list() {
        let mut store = MemoryStore::new();
        store.set(CONTACTS_KEY, "{not json").unwrap();
        let list = ContactList::load(&store);
        assert!(list.is_empty());
    }

    #[test]
    fn test_toggle_all_is_idempotent() {
        let mut store = MemoryStore::new();
        let mut list = ContactList::load(&store);
        list.add(&mut store, "Agim", "").unwrap();
        list.add(&mut store, "Drita", "").unwrap();

        list.toggle_all(&mut store, true).unwrap();
        list.toggle_all(&mut store, true).unwrap();
        assert_eq!(list.selected_count(), 2);

        list.toggle_all(&mut store, false).unwrap();
        list.toggle_all(&mut store, false).unwrap();
        assert_eq!(list.selected_count(), 0);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut store = MemoryStore::new();
        let mut list = ContactList::load(&store);
        list.add(&mut store, "Agim", "").unwrap();
        list.toggle(&mut store, "99", true).unwrap();
        assert_eq!(list.selected_count(), 0);
    }
}
