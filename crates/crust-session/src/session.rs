//! # Configuration Session
//!
//! One customer configuring one product (or one beverage order).
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Session                                │
//! │                                                                         │
//! │  Storefront Action        Session Method          Effect                │
//! │  ─────────────────        ──────────────          ──────                │
//! │                                                                         │
//! │  Open product page ─────► open_product() ───────► fetch + seed state   │
//! │  Open beverage page ────► open_beverages() ─────► empty line items     │
//! │                                                                         │
//! │  Pick size / flavor ────► select_variant() ─────┐                      │
//! │  Click topping ─────────► toggle_topping() ─────┤                      │
//! │  Click drink ───────────► toggle_drink() ───────┼──► quote recomputed  │
//! │  Change quantity ───────► set_quantity() ───────┤                      │
//! │  Change drink count ────► set_line_quantity() ──┘                      │
//! │                                                                         │
//! │  Add to cart ───────────► submit() ─────────────► price, assemble,     │
//! │                                                     hand to sink        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected action leaves both the selection and the quote exactly as they
//! were.

use chrono::{DateTime, Utc};
use crust_core::{
    assemble, compute_total, price_breakdown, BeverageMenu, CoreError, CoreResult, Money, Order,
    PriceBreakdown, ProductDefinition, SelectionState, ToppingCatalog,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::CatalogService;
use crate::error::SessionResult;
use crate::sink::OrderSink;

/// Proof that the sink accepted an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    /// `None` for a beverage order
    pub product_id: Option<String>,
    pub total: Money,
}

/// A product definition bound to the customer's live selection and quote.
#[derive(Debug, Clone)]
pub struct ConfigurationSession {
    /// `None` for a beverage order
    definition: Option<ProductDefinition>,
    toppings: ToppingCatalog,
    beverages: BeverageMenu,
    state: SelectionState,
    quote: Money,
}

impl ConfigurationSession {
    // =========================================================================
    // Opening
    // =========================================================================

    /// Loads product `id`, the topping list and the beverage menu, and opens a
    /// draft seeded with each axis's first value.
    pub async fn open_product<C: CatalogService>(catalog: &C, id: &str) -> SessionResult<Self> {
        let definition = catalog.get_product(id).await?;
        let toppings = ToppingCatalog::new(catalog.get_toppings().await?);
        let beverages = BeverageMenu::new(catalog.get_beverages().await?);

        let session = ConfigurationSession::from_parts(Some(definition), toppings, beverages)?;
        info!(
            product_id = %id,
            quote = %session.quote,
            "configuration session opened"
        );
        Ok(session)
    }

    /// Opens a stand-alone beverage order.
    pub async fn open_beverages<C: CatalogService>(catalog: &C) -> SessionResult<Self> {
        let beverages = BeverageMenu::new(catalog.get_beverages().await?);

        let session = ConfigurationSession::from_parts(None, ToppingCatalog::default(), beverages)?;
        info!(beverages = session.beverages.len(), "beverage session opened");
        Ok(session)
    }

    /// Builds a session from definitions already in hand.
    ///
    /// A combo with drink slots but no named drink options is offered the
    /// whole beverage menu.
    pub fn from_parts(
        definition: Option<ProductDefinition>,
        toppings: ToppingCatalog,
        beverages: BeverageMenu,
    ) -> SessionResult<Self> {
        let definition = definition.map(|mut def| {
            if def.has_drink_slots() && def.drink_options.is_empty() {
                def.drink_options = beverages.names().map(str::to_string).collect();
            }
            def
        });

        let state = match &definition {
            Some(def) => SelectionState::for_product(def)?,
            None => SelectionState::for_beverages(&beverages),
        };
        let quote = compute_total(definition.as_ref(), &state, &beverages)?;

        Ok(ConfigurationSession {
            definition,
            toppings,
            beverages,
            state,
            quote,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn definition(&self) -> Option<&ProductDefinition> {
        self.definition.as_ref()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn toppings(&self) -> &ToppingCatalog {
        &self.toppings
    }

    pub fn beverages(&self) -> &BeverageMenu {
        &self.beverages
    }

    /// Total for the current selection, as of the last accepted action.
    pub fn quote(&self) -> Money {
        self.quote
    }

    /// Itemised price. `None` for beverage sessions, which have no single
    /// product to itemise.
    pub fn breakdown(&self) -> SessionResult<Option<PriceBreakdown>> {
        match &self.definition {
            Some(def) => Ok(Some(price_breakdown(def, &self.state)?)),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Selection Changes
    // =========================================================================

    /// Chooses `value` on `axis`. Returns the new quote.
    pub fn select_variant(&mut self, axis: &str, value: &str) -> SessionResult<Money> {
        debug!(axis = %axis, value = %value, "select variant");
        self.apply("select_variant", |state| state.set_variant(axis, value))
    }

    /// Toggles `topping` on sub-item `sub_item`. Returns the new quote.
    ///
    /// Only toppings from the catalog can be added; any selected topping can
    /// be removed.
    pub fn toggle_topping(&mut self, sub_item: usize, topping: &str) -> SessionResult<Money> {
        debug!(sub_item, topping = %topping, "toggle topping");

        let selected = self
            .state
            .sub_item_toppings()
            .get(sub_item)
            .is_some_and(|set| set.contains(topping));
        if !selected && !self.toppings.is_empty() && !self.toppings.contains(topping) {
            let err = CoreError::invalid(
                "toppings",
                format!("'{}' is not on the topping list", topping),
            );
            warn!(error = %err, "selection rejected");
            return Err(err.into());
        }

        self.apply("toggle_topping", |state| {
            state.toggle_topping(sub_item, topping)
        })
    }

    /// Adds or removes `drink`. Returns the new quote.
    ///
    /// Adding past the slot limit fails with `SlotLimitExceeded` and changes
    /// nothing.
    pub fn toggle_drink(&mut self, drink: &str) -> SessionResult<Money> {
        debug!(drink = %drink, "toggle drink");
        self.apply("toggle_drink", |state| state.toggle_drink(drink))
    }

    pub fn set_quantity(&mut self, quantity: i64) -> SessionResult<Money> {
        debug!(quantity, "set quantity");
        self.apply("set_quantity", |state| state.set_quantity(quantity))
    }

    /// Sets how many of `beverage` a beverage order contains.
    pub fn set_line_quantity(&mut self, beverage: &str, quantity: i64) -> SessionResult<Money> {
        debug!(beverage = %beverage, quantity, "set line quantity");
        self.apply("set_line_quantity", |state| {
            state.set_line_quantity(beverage, quantity)
        })
    }

    /// Runs one selection change and reprices. On any failure the previous
    /// selection is restored.
    fn apply<T>(
        &mut self,
        action: &'static str,
        change: impl FnOnce(&mut SelectionState) -> CoreResult<T>,
    ) -> SessionResult<Money> {
        let previous = self.state.clone();

        let result = change(&mut self.state).and_then(|_| {
            compute_total(self.definition.as_ref(), &self.state, &self.beverages)
        });

        match result {
            Ok(quote) => {
                if quote != self.quote {
                    debug!(action, from = %self.quote, to = %quote, "quote changed");
                }
                self.quote = quote;
                Ok(quote)
            }
            Err(err) => {
                self.state = previous;
                warn!(action, error = %err, "selection rejected");
                Err(err.into())
            }
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Reprices and validates the current selection into an [`Order`].
    ///
    /// Pricing and assembly see the same selection; nothing can change in
    /// between.
    pub fn assemble(&self) -> SessionResult<Order> {
        let total = compute_total(self.definition.as_ref(), &self.state, &self.beverages)?;
        let order = assemble(self.definition.as_ref(), &self.state, total)?;
        Ok(order)
    }

    /// Assembles the order and hands it to `sink`, once.
    ///
    /// The session is left as it was, so a refused order can be fixed up and
    /// submitted again.
    pub async fn submit<S: OrderSink>(&self, sink: &S) -> SessionResult<SubmissionReceipt> {
        let order = self.assemble().inspect_err(|err| {
            warn!(error = %err, "order failed validation");
        })?;

        if let Err(err) = sink.submit(&order).await {
            warn!(
                product_id = ?order.product_id(),
                error = %err,
                "order sink refused order"
            );
            return Err(err.into());
        }

        let receipt = SubmissionReceipt {
            submission_id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            product_id: order.product_id().map(str::to_string),
            total: order.total(),
        };
        info!(
            submission_id = %receipt.submission_id,
            product_id = ?receipt.product_id,
            total = %receipt.total,
            "order submitted"
        );
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
