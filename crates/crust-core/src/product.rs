//! # Product Definitions
//!
//! Immutable schema for a purchasable item.
//!
//! ## Capability Flags
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  One engine, three storefront shapes                                    │
//! │                                                                         │
//! │                    has_variant_axes  has_sub_items  has_drink_slots     │
//! │  Family combo            ✔ (size,         ✔ (pizzas)     ✔ (4)          │
//! │                           wings, side)                                  │
//! │  Panzerotte              ✔ (flavor)       ✔ (1)          ✘              │
//! │  Beverage bundle         (no definition: line-item pricing)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_name, validate_price};

// =============================================================================
// Variant Axis
// =============================================================================

/// A configurable dimension of a product (size, flavor, side, ...).
///
/// `values` is ordered; the first value is the default selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VariantAxis {
    pub name: String,
    pub values: Vec<String>,
    /// Additive price per value. Values without an entry cost nothing extra.
    #[serde(default)]
    pub price_deltas: BTreeMap<String, Money>,
}

impl VariantAxis {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VariantAxis {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            price_deltas: BTreeMap::new(),
        }
    }

    /// Adds a price delta for one value.
    pub fn with_delta(mut self, value: impl Into<String>, delta: Money) -> Self {
        self.price_deltas.insert(value.into(), delta);
        self
    }

    /// The value selected when a draft is opened.
    pub fn default_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn allows(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Price delta for `value` (zero when the axis has no entry for it).
    pub fn delta_for(&self, value: &str) -> Money {
        self.price_deltas.get(value).copied().unwrap_or_default()
    }
}

// =============================================================================
// Product Definition
// =============================================================================

/// A purchasable item as published by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDefinition {
    pub id: String,
    pub name: String,
    pub base_price: Money,

    #[serde(default)]
    pub variant_axes: Vec<VariantAxis>,

    /// Independently toppable units (pizzas in a combo). 0 = not composite.
    #[serde(default)]
    pub sub_item_count: usize,

    /// Toppings per sub-item included in the base price.
    #[serde(default)]
    pub toppings_included_per_sub_item: usize,

    /// Charged per topping beyond the quota, per sub-item.
    #[serde(default)]
    pub extra_topping_unit_price: Money,

    /// Maximum number of drinks. 0 = no drink slots.
    #[serde(default)]
    pub drink_slot_limit: usize,

    /// Names the drink slots may be filled from. Empty = any name.
    #[serde(default)]
    pub drink_options: Vec<String>,
}

impl ProductDefinition {
    /// Creates a plain product: no axes, no sub-items, no drink slots.
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price: Money) -> Self {
        ProductDefinition {
            id: id.into(),
            name: name.into(),
            base_price,
            variant_axes: Vec::new(),
            sub_item_count: 0,
            toppings_included_per_sub_item: 0,
            extra_topping_unit_price: Money::zero(),
            drink_slot_limit: 0,
            drink_options: Vec::new(),
        }
    }

    pub fn with_axis(mut self, axis: VariantAxis) -> Self {
        self.variant_axes.push(axis);
        self
    }

    /// Makes the product composite: `count` toppable units, each with
    /// `included` free toppings and `extra_price` per topping beyond that.
    pub fn with_sub_items(mut self, count: usize, included: usize, extra_price: Money) -> Self {
        self.sub_item_count = count;
        self.toppings_included_per_sub_item = included;
        self.extra_topping_unit_price = extra_price;
        self
    }

    pub fn with_drink_slots<I, S>(mut self, limit: usize, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drink_slot_limit = limit;
        self.drink_options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn axis(&self, name: &str) -> Option<&VariantAxis> {
        self.variant_axes.iter().find(|a| a.name == name)
    }

    pub fn has_variant_axes(&self) -> bool {
        !self.variant_axes.is_empty()
    }

    pub fn has_sub_items(&self) -> bool {
        self.sub_item_count > 0
    }

    pub fn has_drink_slots(&self) -> bool {
        self.drink_slot_limit > 0
    }

    /// Topping count shown as "Min N toppings" next to each sub-item.
    ///
    /// Display hint only: selections below it are legal and priced normally.
    pub fn min_toppings_hint(&self) -> Option<usize> {
        if self.has_sub_items() && self.toppings_included_per_sub_item > 0 {
            Some(self.toppings_included_per_sub_item)
        } else {
            None
        }
    }

    /// Checks that the definition is complete enough to configure and price.
    ///
    /// ## Rules
    /// - id and name present
    /// - base and extra-topping prices non-negative
    /// - every axis named, unique, and offering at least one value
    ///
    /// A definition that fails here is treated as an invalid selection, never
    /// priced.
    pub fn validate(&self) -> CoreResult<()> {
        validate_name("id", &self.id).map_err(|e| CoreError::invalid("id", e.to_string()))?;
        validate_name("name", &self.name)
            .map_err(|e| CoreError::invalid("name", e.to_string()))?;
        validate_price("basePrice", self.base_price)
            .map_err(|e| CoreError::invalid("basePrice", e.to_string()))?;
        validate_price("extraToppingUnitPrice", self.extra_topping_unit_price)
            .map_err(|e| CoreError::invalid("extraToppingUnitPrice", e.to_string()))?;

        for (i, axis) in self.variant_axes.iter().enumerate() {
            validate_name("axis", &axis.name)
                .map_err(|e| CoreError::invalid("variantAxes", e.to_string()))?;

            if axis.values.is_empty() {
                return Err(CoreError::invalid(
                    axis.name.as_str(),
                    "axis offers no values",
                ));
            }

            if self.variant_axes[..i].iter().any(|a| a.name == axis.name) {
                return Err(CoreError::invalid(axis.name.as_str(), "axis is defined twice"));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
