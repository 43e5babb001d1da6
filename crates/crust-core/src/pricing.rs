//! # Pricing Engine
//!
//! Pure functions from (definition, selection) to a total. Deterministic, no
//! side effects; the session calls them after every mutation.
//!
//! ## Two Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Priced product (definition present)                                    │
//! │                                                                         │
//! │    variant_delta  = Σ axis delta[choice]                               │
//! │    extra          = Σ sub-item max(0, |toppings| - quota) × unit       │
//! │    unit_price     = base + variant_delta + extra                       │
//! │    total          = unit_price × quantity                              │
//! │                                                                         │
//! │  Line-item sum (no definition: beverage bundle)                         │
//! │                                                                         │
//! │    total          = Σ beverage price[name] × qty[name]                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are integer cents and catalog prices are whole cents (see
//! [`Money::from_decimal`]), so every total is already exact to two places
//! and rounding it half-up changes nothing. Totals never go below zero.
//! Overflow anywhere is `InvalidSelection` on `totalPrice`, never a panic.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::BeverageMenu;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::ProductDefinition;
use crate::selection::SelectionState;

/// Itemised price of a configured product, for display next to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    pub base: Money,
    pub variant_delta: Money,
    pub extra_toppings: Money,
    pub unit_price: Money,
    pub quantity: i64,
    pub total: Money,
}

/// Computes the total for a selection.
///
/// `Some(definition)` prices a configured product; `None` sums the
/// selection's beverage line items against `beverages`.
///
/// ## Errors
/// `InvalidSelection` when the definition and selection do not fit together
/// (missing axis, unknown value, sub-item count mismatch, unknown beverage)
/// or the total overflows.
pub fn compute_total(
    definition: Option<&ProductDefinition>,
    state: &SelectionState,
    beverages: &BeverageMenu,
) -> CoreResult<Money> {
    match definition {
        Some(definition) => price_breakdown(definition, state).map(|b| b.total),
        None => price_line_items(beverages, state),
    }
}

/// Prices a configured product and returns every component.
pub fn price_breakdown(
    definition: &ProductDefinition,
    state: &SelectionState,
) -> CoreResult<PriceBreakdown> {
    if state.is_beverage_bundle() {
        return Err(CoreError::invalid(
            "definition",
            "selection was opened for a beverage order",
        ));
    }

    let variant_delta = variant_delta(definition, state)?;

    if state.sub_item_count() != definition.sub_item_count {
        return Err(CoreError::invalid(
            "toppings",
            format!(
                "selection has {} sub-items, product defines {}",
                state.sub_item_count(),
                definition.sub_item_count
            ),
        ));
    }
    let extra_toppings = extra_toppings_charge(definition, state.sub_item_toppings())?;

    let unit_price = definition
        .base_price
        .checked_add(variant_delta)
        .and_then(|p| p.checked_add(extra_toppings))
        .ok_or_else(overflow)?
        .non_negative();

    let total = unit_price
        .checked_mul_quantity(state.quantity())
        .ok_or_else(overflow)?
        .non_negative();

    Ok(PriceBreakdown {
        base: definition.base_price,
        variant_delta,
        extra_toppings,
        unit_price,
        quantity: state.quantity(),
        total,
    })
}

/// Sums beverage line items: Σ price × quantity.
pub fn price_line_items(menu: &BeverageMenu, state: &SelectionState) -> CoreResult<Money> {
    let mut total = Money::zero();

    for (name, qty) in state.line_items() {
        let price = menu.price_of(name).ok_or_else(|| {
            CoreError::invalid("drinks", format!("'{}' is not on the beverage menu", name))
        })?;
        let line = price.checked_mul_quantity(*qty).ok_or_else(overflow)?;
        total = total.checked_add(line).ok_or_else(overflow)?;
    }

    Ok(total.non_negative())
}

/// Charge for toppings beyond the per-sub-item quota.
///
/// Each sub-item is charged on its own; unused quota on one pizza never
/// covers extras on another.
pub fn extra_toppings_charge(
    definition: &ProductDefinition,
    sub_item_toppings: &[BTreeSet<String>],
) -> CoreResult<Money> {
    let mut charge = Money::zero();

    for toppings in sub_item_toppings {
        let excess = toppings
            .len()
            .saturating_sub(definition.toppings_included_per_sub_item);
        let excess = i64::try_from(excess).map_err(|_| overflow())?;
        let line = definition
            .extra_topping_unit_price
            .checked_mul_quantity(excess)
            .ok_or_else(overflow)?;
        charge = charge.checked_add(line).ok_or_else(overflow)?;
    }

    Ok(charge)
}

/// Σ price delta of the chosen value on every axis.
fn variant_delta(definition: &ProductDefinition, state: &SelectionState) -> CoreResult<Money> {
    for axis in state.variant_choices().keys() {
        if definition.axis(axis).is_none() {
            return Err(CoreError::invalid(
                axis.as_str(),
                "product definition does not offer this option",
            ));
        }
    }

    let mut delta = Money::zero();
    for axis in &definition.variant_axes {
        let choice = state
            .variant(&axis.name)
            .ok_or_else(|| CoreError::invalid(axis.name.as_str(), "no value chosen"))?;

        if !axis.allows(choice) {
            return Err(CoreError::invalid(
                axis.name.as_str(),
                format!("'{}' is not one of {:?}", choice, axis.values),
            ));
        }

        delta = delta.checked_add(axis.delta_for(choice)).ok_or_else(overflow)?;
    }

    Ok(delta)
}

fn overflow() -> CoreError {
    CoreError::invalid("totalPrice", "amount is too large to price")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Beverage;
    use crate::product::VariantAxis;

    fn family_combo() -> ProductDefinition {
        ProductDefinition::new("combo-1", "Family Combo", Money::from_cents(2499))
            .with_axis(
                VariantAxis::new("size", ["Medium", "Large"])
                    .with_delta("Medium", Money::zero())
                    .with_delta("Large", Money::from_cents(300)),
            )
            .with_axis(VariantAxis::new("side", ["Fries", "Salad"]))
            .with_sub_items(2, 3, Money::from_cents(150))
            .with_drink_slots(4, Vec::<String>::new())
    }

    fn toggle_all(state: &mut SelectionState, sub_item: usize, toppings: &[&str]) {
        for topping in toppings {
            state.toggle_topping(sub_item, topping).unwrap();
        }
    }

    #[test]
    fn test_family_combo_example() {
        let combo = family_combo();
        let mut state = SelectionState::for_product(&combo).unwrap();
        state.set_variant("size", "Large").unwrap();
        toggle_all(&mut state, 0, &["Pepperoni", "Mushrooms", "Olives", "Onions"]);
        toggle_all(&mut state, 1, &["Ham", "Pineapple"]);
        state.set_quantity(2).unwrap();

        let breakdown = price_breakdown(&combo, &state).unwrap();
        assert_eq!(breakdown.variant_delta.cents(), 300);
        assert_eq!(breakdown.extra_toppings.cents(), 150);
        assert_eq!(breakdown.unit_price.cents(), 2949);
        assert_eq!(breakdown.total.cents(), 5898);

        let total = compute_total(Some(&combo), &state, &BeverageMenu::default()).unwrap();
        assert_eq!(total.to_string(), "$58.98");
    }

    #[test]
    fn test_quota_boundary() {
        let def = ProductDefinition::new("pz", "Panzerotte", Money::from_cents(1000))
            .with_sub_items(1, 2, Money::from_cents(100));
        let mut state = SelectionState::for_product(&def).unwrap();

        let extra = |s: &SelectionState| price_breakdown(&def, s).unwrap().extra_toppings;

        assert_eq!(extra(&state), Money::zero());

        toggle_all(&mut state, 0, &["Ham", "Olives"]);
        assert_eq!(extra(&state), Money::zero());

        toggle_all(&mut state, 0, &["Onions"]);
        assert_eq!(extra(&state), Money::from_cents(100));
    }

    #[test]
    fn test_quota_is_not_shared_between_sub_items() {
        let combo = family_combo();
        let mut state = SelectionState::for_product(&combo).unwrap();
        toggle_all(&mut state, 0, &["A", "B", "C", "D", "E"]);

        // Pizza 2 is empty, but its three free toppings do not carry over.
        let breakdown = price_breakdown(&combo, &state).unwrap();
        assert_eq!(breakdown.extra_toppings.cents(), 300);
    }

    #[test]
    fn test_total_non_negative_and_monotonic_in_quantity() {
        let cheap = ProductDefinition::new("s", "Slice", Money::from_cents(100)).with_axis(
            VariantAxis::new("size", ["Kids", "Regular"])
                .with_delta("Kids", Money::from_cents(-250)),
        );
        let mut state = SelectionState::for_product(&cheap).unwrap();

        let mut previous = Money::zero();
        for qty in 1..=5 {
            state.set_quantity(qty).unwrap();
            let total = price_breakdown(&cheap, &state).unwrap().total;
            assert!(!total.is_negative());
            assert!(total >= previous);
            previous = total;
        }
        assert_eq!(previous, Money::zero());

        let combo = family_combo();
        let mut state = SelectionState::for_product(&combo).unwrap();
        toggle_all(&mut state, 1, &["A", "B", "C", "D"]);
        let mut previous = Money::zero();
        for qty in [1, 2, 3, 10, 100] {
            state.set_quantity(qty).unwrap();
            let total = compute_total(Some(&combo), &state, &BeverageMenu::default()).unwrap();
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn test_beverage_example() {
        let menu = BeverageMenu::new([
            Beverage::new("Cola", Money::from_cents(250)),
            Beverage::new("Lemonade", Money::from_cents(300)),
        ]);
        let mut state = SelectionState::for_beverages(&menu);
        state.set_line_quantity("Cola", 2).unwrap();
        state.set_line_quantity("Lemonade", 1).unwrap();

        let total = compute_total(None, &state, &menu).unwrap();
        assert_eq!(total.cents(), 800);
        assert_eq!(total.to_decimal().to_string(), "8.00");
    }

    #[test]
    fn test_empty_beverage_order_is_free() {
        let menu = BeverageMenu::new([Beverage::new("Cola", Money::from_cents(250))]);
        let state = SelectionState::for_beverages(&menu);
        assert_eq!(price_line_items(&menu, &state).unwrap(), Money::zero());
    }

    #[test]
    fn test_beverage_missing_from_menu_is_invalid() {
        let full = BeverageMenu::new([
            Beverage::new("Cola", Money::from_cents(250)),
            Beverage::new("Lemonade", Money::from_cents(300)),
        ]);
        let mut state = SelectionState::for_beverages(&full);
        state.set_line_quantity("Lemonade", 1).unwrap();

        let partial = BeverageMenu::new([Beverage::new("Cola", Money::from_cents(250))]);
        assert!(matches!(
            price_line_items(&partial, &state),
            Err(CoreError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_partial_definition_is_invalid_selection() {
        let combo = family_combo();
        let state = SelectionState::for_product(&combo).unwrap();

        // Same product, but the catalog dropped the side axis.
        let mut partial = combo.clone();
        partial.variant_axes.retain(|a| a.name != "side");
        assert!(matches!(
            price_breakdown(&partial, &state),
            Err(CoreError::InvalidSelection { ref field, .. }) if field == "side"
        ));

        // Same product, but with an axis the selection never saw.
        let extended = combo
            .clone()
            .with_axis(VariantAxis::new("wingsFlavor", ["Hot"]));
        assert!(matches!(
            price_breakdown(&extended, &state),
            Err(CoreError::InvalidSelection { ref field, .. }) if field == "wingsFlavor"
        ));
    }

    #[test]
    fn test_sub_item_mismatch_is_invalid_selection() {
        let combo = family_combo();
        let state = SelectionState::for_product(&combo).unwrap();
        let bigger = combo.clone().with_sub_items(3, 3, Money::from_cents(150));

        assert!(matches!(
            price_breakdown(&bigger, &state),
            Err(CoreError::InvalidSelection { ref field, .. }) if field == "toppings"
        ));
    }

    #[test]
    fn test_product_pricing_rejects_beverage_selection() {
        let state = SelectionState::for_beverages(&BeverageMenu::default());
        assert!(price_breakdown(&family_combo(), &state).is_err());
    }

    #[test]
    fn test_extra_topping_overflow_is_reported() {
        let def = ProductDefinition::new("pz", "Panzerotte", Money::from_cents(1000))
            .with_sub_items(1, 0, Money::from_cents(i64::MAX / 2));
        let mut state = SelectionState::for_product(&def).unwrap();
        toggle_all(&mut state, 0, &["Ham", "Olives", "Onions"]);

        assert!(matches!(
            price_breakdown(&def, &state),
            Err(CoreError::InvalidSelection { ref field, .. }) if field == "totalPrice"
        ));
    }

    #[test]
    fn test_extra_topping_overflow_across_sub_items() {
        let def = ProductDefinition::new("combo", "Combo", Money::zero())
            .with_sub_items(2, 0, Money::from_cents(i64::MAX / 3));
        let mut state = SelectionState::for_product(&def).unwrap();
        toggle_all(&mut state, 0, &["A", "B"]);
        toggle_all(&mut state, 1, &["C", "D"]);

        assert!(extra_toppings_charge(&def, state.sub_item_toppings()).is_err());
    }

    #[test]
    fn test_overflow_is_reported() {
        let def = ProductDefinition::new("big", "Huge Order", Money::from_cents(i64::MAX / 2));
        let mut state = SelectionState::for_product(&def).unwrap();
        state.set_quantity(3).unwrap();
        assert!(matches!(
            price_breakdown(&def, &state),
            Err(CoreError::InvalidSelection { ref field, .. }) if field == "totalPrice"
        ));
    }
}
