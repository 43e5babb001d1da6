//! # Selection State
//!
//! The customer's in-progress choices for one order draft.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Selection Lifecycle                                  │
//! │                                                                         │
//! │  Product page opens ──► for_product(def)   axis defaults, no toppings,  │
//! │  Beverage page opens ─► for_beverages(menu) no drinks, quantity 1       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  User actions          set_variant / toggle_topping / toggle_drink /    │
//! │                        set_quantity / set_line_quantity                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Submit or navigate away ──► dropped (never persisted)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `sub_item_toppings().len()` equals the definition's sub-item count
//! - `chosen_drinks().len() <= drink_slot_limit()`
//! - `quantity() >= 1`
//!
//! Every setter either applies its change completely or returns an error and
//! leaves the state untouched.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::BeverageMenu;
use crate::error::{CoreError, CoreResult};
use crate::product::{ProductDefinition, VariantAxis};
use crate::validation::validate_quantity;

/// What the draft was opened for, and therefore which setters apply.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    Product {
        axes: Vec<VariantAxis>,
        drink_slot_limit: usize,
        drink_options: Vec<String>,
    },
    Beverages {
        names: Vec<String>,
    },
}

/// Mutable per-draft selection, shaped by the product it was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    shape: Shape,
    variant_choices: BTreeMap<String, String>,
    sub_item_toppings: Vec<BTreeSet<String>>,
    chosen_drinks: Vec<String>,
    quantity: i64,
    line_items: BTreeMap<String, i64>,
}

impl SelectionState {
    /// Opens a draft for a product, seeded with each axis's first value.
    ///
    /// ## Errors
    /// `InvalidSelection` if the definition is incomplete (see
    /// [`ProductDefinition::validate`]).
    pub fn for_product(definition: &ProductDefinition) -> CoreResult<Self> {
        definition.validate()?;

        let variant_choices = definition
            .variant_axes
            .iter()
            .filter_map(|axis| {
                axis.default_value()
                    .map(|value| (axis.name.clone(), value.to_string()))
            })
            .collect();

        Ok(SelectionState {
            shape: Shape::Product {
                axes: definition.variant_axes.clone(),
                drink_slot_limit: definition.drink_slot_limit,
                drink_options: definition.drink_options.clone(),
            },
            variant_choices,
            sub_item_toppings: vec![BTreeSet::new(); definition.sub_item_count],
            chosen_drinks: Vec::new(),
            quantity: 1,
            line_items: BTreeMap::new(),
        })
    }

    /// Opens a draft for a stand-alone beverage order (line-item pricing).
    pub fn for_beverages(menu: &BeverageMenu) -> Self {
        SelectionState {
            shape: Shape::Beverages {
                names: menu.names().map(str::to_string).collect(),
            },
            variant_choices: BTreeMap::new(),
            sub_item_toppings: Vec::new(),
            chosen_drinks: Vec::new(),
            quantity: 1,
            line_items: BTreeMap::new(),
        }
    }

    pub fn is_beverage_bundle(&self) -> bool {
        matches!(self.shape, Shape::Beverages { .. })
    }

    // =========================================================================
    // Variant axes
    // =========================================================================

    /// Chooses `value` on `axis`. Last write wins.
    ///
    /// ## Errors
    /// `InvalidSelection` if the product has no such axis or the axis does not
    /// offer `value`.
    pub fn set_variant(&mut self, axis: &str, value: &str) -> CoreResult<()> {
        let allowed = match &self.shape {
            Shape::Product { axes, .. } => axes.iter().find(|a| a.name == axis),
            Shape::Beverages { .. } => None,
        };

        let Some(allowed) = allowed else {
            return Err(CoreError::invalid(axis, "product has no such option"));
        };

        if !allowed.allows(value) {
            return Err(CoreError::invalid(
                axis,
                format!("'{}' is not one of {:?}", value, allowed.values),
            ));
        }

        self.variant_choices
            .insert(axis.to_string(), value.to_string());
        Ok(())
    }

    pub fn variant(&self, axis: &str) -> Option<&str> {
        self.variant_choices.get(axis).map(String::as_str)
    }

    pub fn variant_choices(&self) -> &BTreeMap<String, String> {
        &self.variant_choices
    }

    // =========================================================================
    // Toppings
    // =========================================================================

    /// Adds `topping` to the sub-item if absent, removes it if present.
    ///
    /// No quota is enforced here; going over the quota only affects price.
    /// Returns `true` if the topping is selected after the call.
    ///
    /// ## Errors
    /// `IndexOutOfRange` if `sub_item` is not below the sub-item count.
    pub fn toggle_topping(&mut self, sub_item: usize, topping: &str) -> CoreResult<bool> {
        let count = self.sub_item_toppings.len();
        let toppings = self
            .sub_item_toppings
            .get_mut(sub_item)
            .ok_or(CoreError::IndexOutOfRange {
                index: sub_item,
                count,
            })?;

        if toppings.remove(topping) {
            Ok(false)
        } else {
            toppings.insert(topping.to_string());
            Ok(true)
        }
    }

    pub fn sub_item_toppings(&self) -> &[BTreeSet<String>] {
        &self.sub_item_toppings
    }

    pub fn sub_item_count(&self) -> usize {
        self.sub_item_toppings.len()
    }

    // =========================================================================
    // Drinks
    // =========================================================================

    /// Removes `drink` if chosen, otherwise adds it.
    ///
    /// Returns `true` if the drink is chosen after the call.
    ///
    /// ## Errors
    /// - `InvalidSelection` if the product names its drink options and
    ///   `drink` is not one of them
    /// - `SlotLimitExceeded` if every slot is taken; nothing is replaced
    pub fn toggle_drink(&mut self, drink: &str) -> CoreResult<bool> {
        if let Some(pos) = self.chosen_drinks.iter().position(|d| d == drink) {
            self.chosen_drinks.remove(pos);
            return Ok(false);
        }

        if let Shape::Product { drink_options, .. } = &self.shape {
            if !drink_options.is_empty() && !drink_options.iter().any(|d| d == drink) {
                return Err(CoreError::invalid(
                    "drinks",
                    format!("'{}' is not offered with this product", drink),
                ));
            }
        }

        let limit = self.drink_slot_limit();
        if self.chosen_drinks.len() >= limit {
            return Err(CoreError::SlotLimitExceeded { limit });
        }

        self.chosen_drinks.push(drink.to_string());
        Ok(true)
    }

    /// Chosen drinks in the order they were picked.
    pub fn chosen_drinks(&self) -> &[String] {
        &self.chosen_drinks
    }

    pub fn drink_slot_limit(&self) -> usize {
        match &self.shape {
            Shape::Product {
                drink_slot_limit, ..
            } => *drink_slot_limit,
            Shape::Beverages { .. } => 0,
        }
    }

    pub fn remaining_drink_slots(&self) -> usize {
        self.drink_slot_limit()
            .saturating_sub(self.chosen_drinks.len())
    }

    // =========================================================================
    // Quantity
    // =========================================================================

    /// Sets the number of units ordered. No upper bound.
    ///
    /// ## Errors
    /// `InvalidSelection` if `quantity < 1`.
    pub fn set_quantity(&mut self, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity).map_err(|e| CoreError::invalid("quantity", e.to_string()))?;
        self.quantity = quantity;
        Ok(())
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    // =========================================================================
    // Beverage line items
    // =========================================================================

    /// Sets how many of one beverage a stand-alone beverage order contains.
    /// Zero removes the line.
    ///
    /// ## Errors
    /// `InvalidSelection` if the draft is not a beverage order, the beverage
    /// is not on the menu, or `quantity` is negative.
    pub fn set_line_quantity(&mut self, beverage: &str, quantity: i64) -> CoreResult<()> {
        let Shape::Beverages { names } = &self.shape else {
            return Err(CoreError::invalid(
                "drinks",
                "line quantities apply to beverage orders only",
            ));
        };

        if !names.iter().any(|n| n == beverage) {
            return Err(CoreError::invalid(
                "drinks",
                format!("'{}' is not on the beverage menu", beverage),
            ));
        }

        if quantity < 0 {
            return Err(CoreError::invalid(
                "drinks",
                format!("quantity for '{}' cannot be negative", beverage),
            ));
        }

        if quantity == 0 {
            self.line_items.remove(beverage);
        } else {
            self.line_items.insert(beverage.to_string(), quantity);
        }
        Ok(())
    }

    /// Beverage name → quantity, for beverage orders.
    pub fn line_items(&self) -> &BTreeMap<String, i64> {
        &self.line_items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Beverage;
    use crate::money::Money;

    fn combo() -> ProductDefinition {
        ProductDefinition::new("combo-1", "Family Combo", Money::from_cents(2499))
            .with_axis(VariantAxis::new("size", ["Medium", "Large", "X-Large"]))
            .with_axis(VariantAxis::new("side", ["Fries", "Salad"]))
            .with_sub_items(2, 3, Money::from_cents(150))
            .with_drink_slots(4, ["Cola", "Diet Cola", "Lemonade", "Iced Tea", "Water"])
    }

    #[test]
    fn test_for_product_seeds_defaults() {
        let state = SelectionState::for_product(&combo()).unwrap();

        assert_eq!(state.variant("size"), Some("Medium"));
        assert_eq!(state.variant("side"), Some("Fries"));
        assert_eq!(state.sub_item_count(), 2);
        assert!(state.sub_item_toppings().iter().all(BTreeSet::is_empty));
        assert!(state.chosen_drinks().is_empty());
        assert_eq!(state.quantity(), 1);
        assert!(!state.is_beverage_bundle());
    }

    #[test]
    fn test_for_product_rejects_incomplete_definition() {
        let def = combo().with_axis(VariantAxis::new("flavor", Vec::<String>::new()));
        assert!(matches!(
            SelectionState::for_product(&def),
            Err(CoreError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_set_variant() {
        let mut state = SelectionState::for_product(&combo()).unwrap();

        state.set_variant("size", "Large").unwrap();
        state.set_variant("size", "X-Large").unwrap();
        assert_eq!(state.variant("size"), Some("X-Large"));

        let before = state.clone();
        assert!(matches!(
            state.set_variant("size", "Huge"),
            Err(CoreError::InvalidSelection { ref field, .. }) if field == "size"
        ));
        assert!(matches!(
            state.set_variant("crust", "Thin"),
            Err(CoreError::InvalidSelection { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle_topping_twice_restores_state() {
        let mut state = SelectionState::for_product(&combo()).unwrap();
        let before = state.clone();

        assert!(state.toggle_topping(1, "Olives").unwrap());
        assert!(state.sub_item_toppings()[1].contains("Olives"));
        assert!(state.sub_item_toppings()[0].is_empty());

        assert!(!state.toggle_topping(1, "Olives").unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle_topping_out_of_range() {
        let mut state = SelectionState::for_product(&combo()).unwrap();
        assert_eq!(
            state.toggle_topping(2, "Olives"),
            Err(CoreError::IndexOutOfRange { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_toggle_topping_ignores_quota() {
        let mut state = SelectionState::for_product(&combo()).unwrap();
        for topping in ["Ham", "Pineapple", "Olives", "Onions", "Peppers"] {
            state.toggle_topping(0, topping).unwrap();
        }
        assert_eq!(state.sub_item_toppings()[0].len(), 5);
    }

    #[test]
    fn test_drink_cap_rejects_fifth_drink() {
        let mut state = SelectionState::for_product(&combo()).unwrap();
        for drink in ["Cola", "Diet Cola", "Lemonade", "Iced Tea"] {
            assert!(state.toggle_drink(drink).unwrap());
        }

        let err = state.toggle_drink("Water").unwrap_err();
        assert_eq!(err, CoreError::SlotLimitExceeded { limit: 4 });
        assert_eq!(state.chosen_drinks().len(), 4);
        assert!(!state.chosen_drinks().iter().any(|d| d == "Water"));
        assert_eq!(state.remaining_drink_slots(), 0);

        // Freeing a slot makes room again.
        assert!(!state.toggle_drink("Cola").unwrap());
        assert!(state.toggle_drink("Water").unwrap());
        assert_eq!(
            state.chosen_drinks(),
            ["Diet Cola", "Lemonade", "Iced Tea", "Water"]
        );
    }

    #[test]
    fn test_toggle_drink_rejects_unknown_option() {
        let mut state = SelectionState::for_product(&combo()).unwrap();
        assert!(matches!(
            state.toggle_drink("Milkshake"),
            Err(CoreError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_toggle_drink_without_slots() {
        let def = ProductDefinition::new("pz", "Panzerotte", Money::from_cents(899));
        let mut state = SelectionState::for_product(&def).unwrap();
        assert_eq!(
            state.toggle_drink("Cola"),
            Err(CoreError::SlotLimitExceeded { limit: 0 })
        );
    }

    #[test]
    fn test_set_quantity() {
        let mut state = SelectionState::for_product(&combo()).unwrap();
        state.set_quantity(12).unwrap();
        assert_eq!(state.quantity(), 12);

        assert!(matches!(
            state.set_quantity(0),
            Err(CoreError::InvalidSelection { ref field, .. }) if field == "quantity"
        ));
        assert!(state.set_quantity(-3).is_err());
        assert_eq!(state.quantity(), 12);
    }

    #[test]
    fn test_line_quantities() {
        let menu = BeverageMenu::new([
            Beverage::new("Cola", Money::from_cents(250)),
            Beverage::new("Lemonade", Money::from_cents(300)),
        ]);
        let mut state = SelectionState::for_beverages(&menu);
        assert!(state.is_beverage_bundle());

        state.set_line_quantity("Cola", 2).unwrap();
        state.set_line_quantity("Lemonade", 1).unwrap();
        assert_eq!(state.line_items().get("Cola"), Some(&2));

        state.set_line_quantity("Lemonade", 0).unwrap();
        assert!(!state.line_items().contains_key("Lemonade"));

        assert!(state.set_line_quantity("Water", 1).is_err());
        assert!(state.set_line_quantity("Cola", -1).is_err());
        assert_eq!(state.line_items().get("Cola"), Some(&2));
    }

    #[test]
    fn test_line_quantities_rejected_for_products() {
        let mut state = SelectionState::for_product(&combo()).unwrap();
        assert!(matches!(
            state.set_line_quantity("Cola", 1),
            Err(CoreError::InvalidSelection { .. })
        ));
    }
}
