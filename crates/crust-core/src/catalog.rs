//! # Toppings & Beverages
//!
//! Flat, product-independent lists published by the catalog.
//!
//! Toppings carry no price of their own: they are charged only past a
//! product's quota, at that product's extra-topping price. Beverages carry a
//! unit price and are priced as line items when ordered on their own.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Toppings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Topping {
    pub name: String,
}

impl Topping {
    pub fn new(name: impl Into<String>) -> Self {
        Topping { name: name.into() }
    }
}

/// The toppings on offer. Names are unique; catalog order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToppingCatalog {
    toppings: Vec<Topping>,
}

impl ToppingCatalog {
    /// Builds the catalog, dropping repeated names (first occurrence wins).
    pub fn new(toppings: impl IntoIterator<Item = Topping>) -> Self {
        let mut unique: Vec<Topping> = Vec::new();
        for topping in toppings {
            if !unique.iter().any(|t| t.name == topping.name) {
                unique.push(topping);
            }
        }
        ToppingCatalog { toppings: unique }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.toppings.iter().any(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.toppings.iter().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topping> {
        self.toppings.iter()
    }

    pub fn len(&self) -> usize {
        self.toppings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toppings.is_empty()
    }
}

// =============================================================================
// Beverages
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Beverage {
    pub name: String,
    pub price: Money,
}

impl Beverage {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Beverage {
            name: name.into(),
            price,
        }
    }
}

/// Beverages with their unit prices, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeverageMenu {
    beverages: Vec<Beverage>,
}

impl BeverageMenu {
    /// Builds the menu, dropping repeated names (first occurrence wins).
    pub fn new(beverages: impl IntoIterator<Item = Beverage>) -> Self {
        let mut unique: Vec<Beverage> = Vec::new();
        for beverage in beverages {
            if !unique.iter().any(|b| b.name == beverage.name) {
                unique.push(beverage);
            }
        }
        BeverageMenu { beverages: unique }
    }

    pub fn price_of(&self, name: &str) -> Option<Money> {
        self.beverages
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.price)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.price_of(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.beverages.iter().map(|b| b.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Beverage> {
        self.beverages.iter()
    }

    pub fn len(&self) -> usize {
        self.beverages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beverages.is_empty()
    }
}
