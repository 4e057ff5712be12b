//! Send history: immutable snapshots of every confirmed send
//!
//! Each confirmed send is recorded as a value snapshot of the valid
//! products and selected contacts at that moment, so later edits to the
//! live lists never alter what was logged. Entries are prepended (newest
//! first) and persisted under a fixed key.

use crate::model::message::format_price_per_unit;
use crate::services::storage::KvStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key for the serialized history list.
pub const HISTORY_KEY: &str = "viber-history";

/// Product fields captured at send time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub price: f64,
    pub unit: String,
}

/// Contact fields captured at send time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A confirmed send, before an id is assigned.
///
/// This is also the shape of the JSON data export: date, the valid
/// products, the selected contacts, and the exact rendered message.
#[derive(Debug, Clone, Serialize)]
pub struct SendDraft {
    pub date: String,
    pub products: Vec<ProductSnapshot>,
    pub contacts: Vec<ContactSnapshot>,
    pub message: String,
}

/// One immutable entry in the send history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub date: String,
    pub products: Vec<ProductSnapshot>,
    pub contacts: Vec<ContactSnapshot>,
    pub message: String,
}

impl HistoryEntry {
    /// "Name (120 L/kg)" summary of one snapshotted product.
    pub fn product_summary(product: &ProductSnapshot) -> String {
        format!(
            "{} ({})",
            product.name,
            format_price_per_unit(product.price, &product.unit)
        )
    }
}

/// Persisted ordered list of history entries, newest first.
#[derive(Debug)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl HistoryLog {
    /// Load the persisted history. Absent key or malformed JSON yields an
    /// empty log with a logged diagnostic.
    pub fn load(store: &dyn KvStore) -> Self {
        let raw = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(error = %e, "failed to read stored history, starting empty");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => {
                let next_id = entries
                    .iter()
                    .filter_map(|e| e.id.parse::<u64>().ok())
                    .max()
                    .map(|max| max + 1)
                    .unwrap_or(1);
                Self { entries, next_id }
            }
            Err(e) => {
                warn!(error = %e, "failed to parse stored history, starting empty");
                Self::default()
            }
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assign a fresh id to the draft, prepend it, and persist. Existing
    /// entries keep their relative order and are never touched.
    pub fn append(&mut self, store: &mut dyn KvStore, draft: SendDraft) -> Result<()> {
        let entry = HistoryEntry {
            id: self.next_id.to_string(),
            date: draft.date,
            products: draft.products,
            contacts: draft.contacts,
            message: draft.message,
        };
        self.next_id += 1;
        self.entries.insert(0, entry);
        self.save(store)
    }

    /// Empty both the in-memory list and the persisted copy. The caller is
    /// responsible for having asked the user to confirm first.
    pub fn clear(&mut self, store: &mut dyn KvStore) -> Result<()> {
        self.entries.clear();
        store.remove(HISTORY_KEY)
    }

    /// Render the whole history as CSV, one row per entry. Returns None
    /// when there is nothing to export.
    pub fn to_csv(&self) -> Result<Option<Vec<u8>>> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "Data",
            "Produktet",
            "Çmimet",
            "Çmimet për njësi",
            "Kontaktet",
            "Mesazhi",
        ])?;

        for entry in &self.entries {
            let names = entry
                .products
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            let summaries = entry
                .products
                .iter()
                .map(HistoryEntry::product_summary)
                .collect::<Vec<_>>()
                .join(", ");
            let prices = entry
                .products
                .iter()
                .map(|p| format_price_per_unit(p.price, &p.unit))
                .collect::<Vec<_>>()
                .join("; ");
            let contacts = entry
                .contacts
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join("; ");

            writer.write_record([
                entry.date.as_str(),
                names.as_str(),
                summaries.as_str(),
                prices.as_str(),
                contacts.as_str(),
                entry.message.as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("failed to finish csv export: {}", e))?;
        Ok(Some(bytes))
    }

    fn save(&self, store: &mut dyn KvStore) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        store.set(HISTORY_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStore;

    fn draft(date: &str, message: &str) -> SendDraft {
        SendDraft {
            date: date.to_string(),
            products: vec![ProductSnapshot {
                name: "Mollë".to_string(),
                price: 120.0,
                unit: "kg".to_string(),
            }],
            contacts: vec![ContactSnapshot {
                name: "Agim".to_string(),
                phone: None,
            }],
            message: message.to_string(),
        }
    }

    #[test]
    fn test_first_id_in_empty_store_is_one() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::load(&store);
        log.append(&mut store, draft("2025-08-29T07:00:00Z", "a")).unwrap();
        assert_eq!(log.entries()[0].id, "1");
    }

    #[test]
    fn test_append_prepends_and_preserves_order() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::load(&store);
        log.append(&mut store, draft("2025-08-28T07:00:00Z", "first")).unwrap();
        log.append(&mut store, draft("2025-08-29T07:00:00Z", "second")).unwrap();
        log.append(&mut store, draft("2025-08-30T07:00:00Z", "third")).unwrap();

        let messages: Vec<&str> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["third", "second", "first"]);

        // Prior entries are untouched by later appends
        assert_eq!(log.entries()[2].date, "2025-08-28T07:00:00Z");
    }

    #[test]
    fn test_round_trip_yields_identical_entries() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::load(&store);
        log.append(&mut store, draft("2025-08-29T07:00:00Z", "a")).unwrap();
        log.append(&mut store, draft("2025-08-30T07:00:00Z", "b")).unwrap();

        let reloaded = HistoryLog::load(&store);
        assert_eq!(reloaded.entries(), log.entries());

        // Ids keep advancing after a reload
        let mut reloaded = reloaded;
        reloaded.append(&mut store, draft("2025-08-31T07:00:00Z", "c")).unwrap();
        assert_eq!(reloaded.entries()[0].id, "3");
    }

    #[test]
    fn test_malformed_stored_json_yields_empty_log() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "[{\"broken\":").unwrap();
        assert!(HistoryLog::load(&store).is_empty());
    }

    #[test]
    fn test_clear_empties_memory_and_store() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::load(&store);
        log.append(&mut store, draft("2025-08-29T07:00:00Z", "a")).unwrap();
        log.clear(&mut store).unwrap();

        assert!(log.is_empty());
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn test_csv_export_empty_log_is_noop() {
        let log = HistoryLog::default();
        assert!(log.to_csv().unwrap().is_none());
    }

    #[test]
    fn test_csv_export_shape_and_quoting() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::load(&store);
        log.append(&mut store, draft("2025-08-29T07:00:00Z", "line one\nsaid \"hello\""))
            .unwrap();
        let mut two_products = draft("2025-08-30T07:00:00Z", "plain\ntext");
        two_products.products.push(ProductSnapshot {
            name: "Banane".to_string(),
            price: 90.0,
            unit: "kg".to_string(),
        });
        log.append(&mut store, two_products).unwrap();

        let bytes = log.to_csv().unwrap().unwrap();
        let csv = String::from_utf8(bytes).unwrap();

        // Header row plus two data rows
        assert!(csv.starts_with("Data,Produktet,Çmimet,Çmimet për njësi,Kontaktet,Mesazhi\n"));
        // Delimiter-free fields stay unquoted
        assert!(csv.contains("2025-08-29T07:00:00Z,Mollë,Mollë (120 L/kg),120 L/kg,Agim,"));
        // The comma-joined summary column gets quoted
        assert!(csv.contains("\"Mollë (120 L/kg), Banane (90 L/kg)\""));
        // Embedded quotes are doubled and the whole message field quoted
        assert!(csv.contains("\"line one\nsaid \"\"hello\"\"\""));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        assert_eq!(reader.records().count(), 2);
    }
}
