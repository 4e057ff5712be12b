//! Product list state
//!
//! Products are the editable daily price rows. They are never persisted;
//! the list starts from the same five staples every session and lives only
//! in memory. Whether a product is usable in the outgoing message is a
//! predicate evaluated by consumers, not stored state.

use serde::{Deserialize, Serialize};

/// A single product row: name, price and unit of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub unit: String,
}

impl Product {
    /// A product is valid for messaging when it has a name and a positive price.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.price > 0.0
    }
}

/// Editable field of a product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Price,
    Unit,
}

impl ProductField {
    pub fn all() -> [ProductField; 3] {
        [ProductField::Name, ProductField::Price, ProductField::Unit]
    }

    pub fn label(&self) -> &str {
        match self {
            ProductField::Name => "Produkti",
            ProductField::Price => "Çmimi",
            ProductField::Unit => "Njësia",
        }
    }
}

/// Ordered list of products with fresh-id bookkeeping.
#[derive(Debug, Clone)]
pub struct ProductList {
    items: Vec<Product>,
    next_id: u64,
}

impl Default for ProductList {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ProductList {
    /// The fixed seed of five staple items, prices left at zero for the
    /// user to fill in each morning.
    pub fn seeded() -> Self {
        let names = ["Mollë", "Banane", "Portokall", "Domate", "Kastravec"];
        let items = names
            .iter()
            .enumerate()
            .map(|(i, name)| Product {
                id: (i + 1).to_string(),
                name: name.to_string(),
                price: 0.0,
                unit: "kg".to_string(),
            })
            .collect();
        Self {
            items,
            next_id: names.len() as u64 + 1,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.items.get(index)
    }

    /// Append a new blank row (empty name, zero price, unit "kg").
    pub fn add(&mut self) -> &Product {
        let product = Product {
            id: self.next_id.to_string(),
            name: String::new(),
            price: 0.0,
            unit: "kg".to_string(),
        };
        self.next_id += 1;
        self.items.push(product);
        self.items.last().unwrap()
    }

    /// Remove the row with the given id; no-op if absent.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|p| p.id != id);
    }

    /// Replace one field of the matching row, coercing the raw input.
    ///
    /// Price is parsed as a decimal and defaults to 0 when the input does
    /// not parse; name and unit are stored as given. No-op for unknown ids.
    pub fn update_field(&mut self, id: &str, field: ProductField, raw: &str) {
        if let Some(product) = self.items.iter_mut().find(|p| p.id == id) {
            match field {
                ProductField::Name => product.name = raw.to_string(),
                ProductField::Price => product.price = raw.trim().parse().unwrap_or(0.0),
                ProductField::Unit => product.unit = raw.to_string(),
            }
        }
    }

    /// Products eligible for the outgoing message.
    pub fn valid(&self) -> Vec<&Product> {
        self.items.iter().filter(|p| p.is_valid()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_five_staples_with_zero_prices() {
        let list = ProductList::seeded();
        assert_eq!(list.len(), 5);
        assert!(list.items().iter().all(|p| p.price == 0.0 && p.unit == "kg"));
        assert_eq!(list.items()[0].name, "Mollë");
        // Seed prices are zero, so nothing is valid until edited
        assert!(list.valid().is_empty());
    }

    #[test]
    fn test_add_appends_blank_row_with_fresh_id() {
        let mut list = ProductList::seeded();
        let id = list.add().id.clone();
        assert_eq!(list.len(), 6);
        assert_eq!(id, "6");
        let added = list.items().last().unwrap();
        assert_eq!(added.name, "");
        assert_eq!(added.price, 0.0);
        assert_eq!(added.unit, "kg");

        let id2 = list.add().id.clone();
        assert_ne!(id, id2);
    }

    #[test]
    fn test_remove_is_noop_for_unknown_id() {
        let mut list = ProductList::seeded();
        list.remove("does-not-exist");
        assert_eq!(list.len(), 5);
        list.remove("3");
        assert_eq!(list.len(), 4);
        assert!(list.items().iter().all(|p| p.id != "3"));
    }

    #[test]
    fn test_update_price_parses_decimal_and_defaults_to_zero() {
        let mut list = ProductList::seeded();
        list.update_field("1", ProductField::Price, "120");
        assert_eq!(list.items()[0].price, 120.0);
        list.update_field("1", ProductField::Price, " 99.5 ");
        assert_eq!(list.items()[0].price, 99.5);
        list.update_field("1", ProductField::Price, "abc");
        assert_eq!(list.items()[0].price, 0.0);
    }

    #[test]
    fn test_validity_filter_excludes_unnamed_and_nonpositive() {
        let mut list = ProductList::seeded();
        list.update_field("1", ProductField::Price, "120");
        list.update_field("2", ProductField::Price, "80");
        list.update_field("2", ProductField::Name, "   ");
        list.update_field("3", ProductField::Price, "-5");
        let valid: Vec<&str> = list.valid().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(valid, vec!["Mollë"]);
    }
}
