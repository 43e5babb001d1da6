//! # Storefront Catalog Records
//!
//! The JSON shapes the storefront catalog publishes, and their conversion
//! into engine definitions.
//!
//! ## Field Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog JSON                      ProductDefinition                    │
//! │  ────────────                      ─────────────────                    │
//! │  _id, name                     ──► id, name                             │
//! │  price                         ──► base_price (whole cents)             │
//! │  details.sizes + sizePrices    ──► axis "size" with deltas              │
//! │  details.Flavors               ──► axis "flavor"                        │
//! │  details.wingsFlavors          ──► axis "wingsFlavor"                   │
//! │  details.sides                 ──► axis "side"                          │
//! │  details.pizzas                ──► sub_item_count                       │
//! │  details.toppingsPerPizza      ──► toppings_included_per_sub_item       │
//! │  details.extraToppingPrice     ──► extra_topping_unit_price             │
//! │  details.drinks / drinkLimit   ──► drink_options / drink_slot_limit     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A product with a topping quota but no `pizzas` count (the panzerotte) is a
//! single toppable unit. A combo (`pizzas` present) that states no
//! `drinkLimit` gets the configured default number of drink slots.

use std::collections::BTreeMap;

use crust_core::{Beverage, Money, ProductDefinition, Topping, VariantAxis};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Category under which the catalog lists beverages.
pub const BEVERAGE_CATEGORY: &str = "Beverages";

/// One product as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub details: ProductDetails,
}

/// Product-specific configuration block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub size_prices: BTreeMap<String, Decimal>,
    #[serde(default, rename = "Flavors", alias = "flavors")]
    pub flavors: Vec<String>,
    #[serde(default)]
    pub wings_flavors: Vec<String>,
    #[serde(default)]
    pub sides: Vec<String>,
    #[serde(default)]
    pub pizzas: Option<usize>,
    #[serde(default)]
    pub toppings_per_pizza: Option<usize>,
    #[serde(default)]
    pub extra_topping_price: Option<Decimal>,
    #[serde(default)]
    pub drinks: Vec<String>,
    #[serde(default)]
    pub drink_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTopping {
    pub name: String,
}

impl From<CatalogTopping> for Topping {
    fn from(t: CatalogTopping) -> Self {
        Topping::new(t.name)
    }
}

/// A whole catalog in one document: products (beverages included) and
/// toppings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
    #[serde(default)]
    pub toppings: Vec<CatalogTopping>,
}

impl CatalogProduct {
    pub fn is_beverage(&self) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(BEVERAGE_CATEGORY))
    }

    /// Converts the record into a beverage menu entry.
    pub fn to_beverage(&self) -> CatalogResult<Beverage> {
        Ok(Beverage::new(
            self.name.clone(),
            price(&self.id, "price", self.price)?,
        ))
    }

    /// Converts the record into an engine definition.
    ///
    /// `default_drink_slot_limit` applies to combos that do not state their
    /// own `drinkLimit`.
    pub fn to_definition(&self, default_drink_slot_limit: usize) -> CatalogResult<ProductDefinition> {
        let d = &self.details;
        let mut definition =
            ProductDefinition::new(&self.id, &self.name, price(&self.id, "price", self.price)?);

        if !d.sizes.is_empty() {
            let mut axis = VariantAxis::new("size", d.sizes.iter().cloned());
            for (size, delta) in &d.size_prices {
                axis = axis.with_delta(size.clone(), price_delta(&self.id, "sizePrices", *delta)?);
            }
            definition = definition.with_axis(axis);
        }
        for (name, values) in [
            ("flavor", &d.flavors),
            ("wingsFlavor", &d.wings_flavors),
            ("side", &d.sides),
        ] {
            if !values.is_empty() {
                definition = definition.with_axis(VariantAxis::new(name, values.iter().cloned()));
            }
        }

        let toppable = d.toppings_per_pizza.is_some() || d.extra_topping_price.is_some();
        let sub_items = d.pizzas.unwrap_or(usize::from(toppable));
        let extra_price = match d.extra_topping_price {
            Some(amount) => price(&self.id, "extraToppingPrice", amount)?,
            None => Money::zero(),
        };
        definition =
            definition.with_sub_items(sub_items, d.toppings_per_pizza.unwrap_or(0), extra_price);

        let drink_slots = d
            .drink_limit
            .or_else(|| {
                (d.pizzas.is_some() || !d.drinks.is_empty()).then_some(default_drink_slot_limit)
            })
            .unwrap_or(0);

        Ok(definition.with_drink_slots(drink_slots, d.drinks.iter().cloned()))
    }
}

/// A non-negative catalog price in whole cents.
fn price(product_id: &str, field: &str, amount: Decimal) -> CatalogResult<Money> {
    let money = price_delta(product_id, field, amount)?;
    if money.is_negative() {
        return Err(CatalogError::Malformed(format!(
            "{}: {} cannot be negative ({})",
            product_id, field, amount
        )));
    }
    Ok(money)
}

/// A signed price adjustment in whole cents.
///
/// Fractions of a cent are refused rather than rounded.
fn price_delta(product_id: &str, field: &str, amount: Decimal) -> CatalogResult<Money> {
    if !Money::is_whole_cents(amount) {
        return Err(CatalogError::Malformed(format!(
            "{}: {} {} has a fraction of a cent",
            product_id, field, amount
        )));
    }
    Money::from_decimal(amount).ok_or_else(|| {
        CatalogError::Malformed(format!(
            "{}: {} {} is out of range",
            product_id, field, amount
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY_COMBO: &str = r#"{
        "_id": "combo-family",
        "name": "Family Combo",
        "price": 24.99,
        "category": "Combos",
        "image": "/images/family-combo.png",
        "details": {
            "pizzas": 2,
            "sizes": ["Medium", "Large"],
            "sizePrices": { "Medium": 0, "Large": 3.00 },
            "wingsFlavors": ["Honey Garlic", "Hot"],
            "sides": ["Fries", "Garlic Bread"],
            "toppingsPerPizza": 3,
            "extraToppingPrice": 1.50
        }
    }"#;

    const PANZEROTTE: &str = r#"{
        "_id": "panz-1",
        "name": "Panzerotte",
        "price": 8.99,
        "details": {
            "Flavors": ["Classic", "Spicy"],
            "toppingsPerPizza": 2,
            "extraToppingPrice": 1
        }
    }"#;

    #[test]
    fn test_family_combo_conversion() {
        let record: CatalogProduct = serde_json::from_str(FAMILY_COMBO).unwrap();
        let def = record.to_definition(4).unwrap();

        assert_eq!(def.id, "combo-family");
        assert_eq!(def.base_price.cents(), 2499);
        assert_eq!(def.sub_item_count, 2);
        assert_eq!(def.toppings_included_per_sub_item, 3);
        assert_eq!(def.extra_topping_unit_price.cents(), 150);
        assert_eq!(def.drink_slot_limit, 4);

        let names: Vec<_> = def.variant_axes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["size", "wingsFlavor", "side"]);
        assert_eq!(def.axis("size").unwrap().delta_for("Large").cents(), 300);
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_panzerotte_is_single_toppable_unit() {
        let record: CatalogProduct = serde_json::from_str(PANZEROTTE).unwrap();
        let def = record.to_definition(4).unwrap();

        assert_eq!(def.sub_item_count, 1);
        assert_eq!(def.toppings_included_per_sub_item, 2);
        assert_eq!(def.extra_topping_unit_price.cents(), 100);
        assert_eq!(def.drink_slot_limit, 0);
        assert_eq!(def.axis("flavor").unwrap().default_value(), Some("Classic"));
    }

    #[test]
    fn test_explicit_drink_limit_wins() {
        let mut record: CatalogProduct = serde_json::from_str(FAMILY_COMBO).unwrap();
        record.details.drink_limit = Some(2);
        assert_eq!(record.to_definition(4).unwrap().drink_slot_limit, 2);
    }

    #[test]
    fn test_beverage_record() {
        let json = r#"{"_id":"bev-cola","name":"Cola","price":2.5,"category":"Beverages"}"#;
        let record: CatalogProduct = serde_json::from_str(json).unwrap();

        assert!(record.is_beverage());
        let beverage = record.to_beverage().unwrap();
        assert_eq!(beverage.name, "Cola");
        assert_eq!(beverage.price.cents(), 250);
    }

    #[test]
    fn test_sub_cent_prices_are_malformed() {
        let json = r#"{"_id":"bev-odd","name":"Odd Soda","price":1.005,"category":"Beverages"}"#;
        let record: CatalogProduct = serde_json::from_str(json).unwrap();
        assert!(matches!(record.to_beverage(), Err(CatalogError::Malformed(_))));

        let mut combo: CatalogProduct = serde_json::from_str(FAMILY_COMBO).unwrap();
        combo
            .details
            .size_prices
            .insert("Large".to_string(), Decimal::new(3005, 3));
        let err = combo.to_definition(4).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(ref msg) if msg.contains("sizePrices")));
    }

    #[test]
    fn test_negative_price_is_malformed() {
        let json = r#"{"_id":"bad","name":"Bad","price":-1}"#;
        let record: CatalogProduct = serde_json::from_str(json).unwrap();
        assert!(matches!(
            record.to_definition(4),
            Err(CatalogError::Malformed(_))
        ));
    }
}
