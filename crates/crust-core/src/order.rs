//! # Order Assembly
//!
//! Turns a finished selection into the immutable payload handed to the
//! order sink.
//!
//! ## Assembly Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Add to Cart                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_total(def, state) ──► total      (always recompute first)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  assemble(def, state, total) ← THIS MODULE                             │
//! │       │                                                                 │
//! │       ├── axis without a valid choice? → Required / NotAllowed         │
//! │       ├── wrong number of sub-items?  → CountMismatch                  │
//! │       ├── too many drinks?            → OutOfRange                     │
//! │       ├── quantity < 1?               → MustBePositive                 │
//! │       │                                                                 │
//! │       └── OK → Order (copied selections + the supplied total)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The assembler does not price. It copies the total it is given, so callers
//! must recompute and assemble against the same snapshot of the selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::product::ProductDefinition;
use crate::selection::SelectionState;
use crate::validation::{validate_allowed, validate_price, validate_quantity, ValidationResult};

/// One beverage line of a stand-alone beverage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub name: String,
    pub quantity: i64,
}

/// A validated, priced order. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// `None` for beverage orders, which have no single product.
    product_id: Option<String>,
    /// Axis name → chosen value.
    variants: BTreeMap<String, String>,
    /// Toppings per sub-item, in sub-item order.
    toppings: Vec<Vec<String>>,
    /// Drinks filling the product's drink slots, in pick order.
    drinks: Vec<String>,
    /// Beverage order lines.
    line_items: Vec<LineItem>,
    quantity: i64,
    total_price: Money,
}

impl Order {
    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn variants(&self) -> &BTreeMap<String, String> {
        &self.variants
    }

    pub fn variant(&self, axis: &str) -> Option<&str> {
        self.variants.get(axis).map(String::as_str)
    }

    pub fn toppings(&self) -> &[Vec<String>] {
        &self.toppings
    }

    pub fn drinks(&self) -> &[String] {
        &self.drinks
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn total(&self) -> Money {
        self.total_price
    }
}

/// Validates `state` against `definition` and builds the order.
///
/// `definition` is `None` for a beverage order. Rules are checked in order and
/// the first failure is returned.
pub fn assemble(
    definition: Option<&ProductDefinition>,
    state: &SelectionState,
    total: Money,
) -> ValidationResult<Order> {
    validate_price("totalPrice", total)?;

    match definition {
        Some(definition) => assemble_product(definition, state, total),
        None => assemble_line_items(state, total),
    }
}

fn assemble_product(
    definition: &ProductDefinition,
    state: &SelectionState,
    total: Money,
) -> ValidationResult<Order> {
    if state.is_beverage_bundle() {
        return Err(ValidationError::InvalidFormat {
            field: "selection".to_string(),
            reason: "beverage selection cannot be ordered as a product".to_string(),
        });
    }

    for axis in &definition.variant_axes {
        let field = format!("variant.{}", axis.name);
        let choice = state
            .variant(&axis.name)
            .ok_or_else(|| ValidationError::Required {
                field: field.clone(),
            })?;
        validate_allowed(&field, choice, &axis.values)?;
    }

    if state.sub_item_count() != definition.sub_item_count {
        return Err(ValidationError::CountMismatch {
            field: "toppings".to_string(),
            expected: definition.sub_item_count,
            actual: state.sub_item_count(),
        });
    }

    if state.chosen_drinks().len() > definition.drink_slot_limit {
        return Err(ValidationError::OutOfRange {
            field: "drinks".to_string(),
            min: 0,
            max: definition.drink_slot_limit as i64,
        });
    }

    validate_quantity(state.quantity())?;

    let variants = definition
        .variant_axes
        .iter()
        .filter_map(|axis| {
            state
                .variant(&axis.name)
                .map(|v| (axis.name.clone(), v.to_string()))
        })
        .collect();

    Ok(Order {
        product_id: Some(definition.id.clone()),
        variants,
        toppings: state
            .sub_item_toppings()
            .iter()
            .map(|set| set.iter().cloned().collect())
            .collect(),
        drinks: state.chosen_drinks().to_vec(),
        line_items: Vec::new(),
        quantity: state.quantity(),
        total_price: total,
    })
}

fn assemble_line_items(state: &SelectionState, total: Money) -> ValidationResult<Order> {
    if !state.is_beverage_bundle() {
        return Err(ValidationError::Required {
            field: "productId".to_string(),
        });
    }

    if state.line_items().is_empty() {
        return Err(ValidationError::Required {
            field: "drinks".to_string(),
        });
    }

    Ok(Order {
        product_id: None,
        variants: BTreeMap::new(),
        toppings: Vec::new(),
        drinks: Vec::new(),
        line_items: state
            .line_items()
            .iter()
            .map(|(name, qty)| LineItem {
                name: name.clone(),
                quantity: *qty,
            })
            .collect(),
        quantity: 1,
        total_price: total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
