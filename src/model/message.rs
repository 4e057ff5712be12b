//! Message composition
//!
//! The outgoing text is a pure function of the current product list and
//! the calendar date; it is recomputed on every render rather than stored.

use crate::model::product::Product;
use chrono::{Datelike, NaiveDate, Weekday};

/// Fixed reply when no product has a name and a positive price.
pub const NO_VALID_PRODUCTS: &str =
    "🍎🥬 Mirëmëngjesi!\n\nNuk keni produkte të vlefshme për të dërguar sot.";

/// Render the promotional message for the given products and date.
///
/// Invalid products (empty name or non-positive price) are filtered out;
/// with none left the fixed no-products text is returned instead of the
/// template.
pub fn compose(products: &[Product], date: NaiveDate) -> String {
    let valid: Vec<&Product> = products.iter().filter(|p| p.is_valid()).collect();
    if valid.is_empty() {
        return NO_VALID_PRODUCTS.to_string();
    }

    let mut message = format!(
        "🍎🥬 Mirëmëngjesi!\n\n📅 {}\n\n💰 ÇMIMET E DITËS:\n\n",
        format_date(date)
    );
    for product in valid {
        message.push_str(&format!(
            "🔹 {}: {} L/{}\n",
            product.name,
            format_price(product.price),
            product.unit
        ));
    }
    message.push_str(
        "\n✨ Fruta dhe perime të freskëta!\n📞 Për porosi mund të më kontaktoni.\n\nFaleminderit! 🙏",
    );
    message
}

/// Whole prices without decimals, everything else in its natural decimal
/// form: 120 → "120", 99.5 → "99.5".
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.0}", price)
    } else {
        price.to_string()
    }
}

/// `{price} L/{unit}` as it appears in message lines and CSV columns.
pub fn format_price_per_unit(price: f64, unit: &str) -> String {
    format!("{} L/{}", format_price(price), unit)
}

/// Albanian long date, e.g. "e premte, 29 gusht 2025".
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month()),
        date.year()
    )
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "e hënë",
        Weekday::Tue => "e martë",
        Weekday::Wed => "e mërkurë",
        Weekday::Thu => "e enjte",
        Weekday::Fri => "e premte",
        Weekday::Sat => "e shtunë",
        Weekday::Sun => "e diel",
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "janar",
        2 => "shkurt",
        3 => "mars",
        4 => "prill",
        5 => "maj",
        6 => "qershor",
        7 => "korrik",
        8 => "gusht",
        9 => "shtator",
        10 => "tetor",
        11 => "nëntor",
        _ => "dhjetor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64, unit: &str) -> Product {
        Product {
            id: "1".to_string(),
            name: name.to_string(),
            price,
            unit: unit.to_string(),
        }
    }

    #[test]
    fn test_format_price_whole_and_fractional() {
        assert_eq!(format_price(120.0), "120");
        assert_eq!(format_price(99.5), "99.5");
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(1000.25), "1000.25");
    }

    #[test]
    fn test_format_date_albanian() {
        // 2025-08-29 was a Friday
        let date = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
        assert_eq!(format_date(date), "e premte, 29 gusht 2025");
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(date), "e hënë, 5 janar 2026");
    }

    #[test]
    fn test_compose_single_product() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
        let message = compose(&[product("Apples", 120.0, "kg")], date);
        assert!(message.starts_with("🍎🥬 Mirëmëngjesi!\n\n📅 e premte, 29 gusht 2025\n\n"));
        assert!(message.contains("💰 ÇMIMET E DITËS:\n\n🔹 Apples: 120 L/kg\n"));
        assert!(message.ends_with("Faleminderit! 🙏"));
        // Exactly one product line
        assert_eq!(message.matches("🔹").count(), 1);
    }

    #[test]
    fn test_compose_filters_invalid_products() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
        let products = vec![
            product("Mollë", 120.0, "kg"),
            product("", 80.0, "kg"),
            product("Domate", 0.0, "kg"),
            product("Banane", 99.5, "kg"),
        ];
        let message = compose(&products, date);
        assert!(message.contains("🔹 Mollë: 120 L/kg\n"));
        assert!(message.contains("🔹 Banane: 99.5 L/kg\n"));
        assert_eq!(message.matches("🔹").count(), 2);
    }

    #[test]
    fn test_compose_without_valid_products() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
        assert_eq!(compose(&[], date), NO_VALID_PRODUCTS);
        assert_eq!(compose(&[product("Mollë", 0.0, "kg")], date), NO_VALID_PRODUCTS);
    }
}
