//! # crust-core: Product Configuration & Pricing Engine
//!
//! Turns a product definition plus a set of customer selections (size,
//! flavor, per-pizza toppings, side, drinks, quantity) into a validated,
//! priced order payload. Everything here is pure computation over in-memory
//! state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Crust Architecture                             │
//! │                                                                         │
//! │  Catalog Service ──► ProductDefinition / ToppingCatalog / BeverageMenu  │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ crust-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │ selection │  │  pricing  │  │   order   │  │   │
//! │  │   │ Definition│─►│  State    │─►│  Engine   │─►│ Assembler │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                           Order Sink                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - Product definitions and variant axes
//! - [`catalog`] - Toppings and beverages
//! - [`selection`] - Per-draft selection state with validated setters
//! - [`pricing`] - Pure price computation
//! - [`order`] - Order assembly and validation
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level rules shared by the modules above
//!
//! ## Example Usage
//!
//! ```rust
//! use crust_core::{
//!     assemble, compute_total, BeverageMenu, Money, ProductDefinition, SelectionState,
//!     VariantAxis,
//! };
//!
//! let combo = ProductDefinition::new("combo-1", "Family Combo", Money::from_cents(2499))
//!     .with_axis(
//!         VariantAxis::new("size", ["Medium", "Large"])
//!             .with_delta("Large", Money::from_cents(300)),
//!     )
//!     .with_sub_items(2, 3, Money::from_cents(150));
//!
//! let mut state = SelectionState::for_product(&combo).unwrap();
//! state.set_variant("size", "Large").unwrap();
//! state.set_quantity(2).unwrap();
//!
//! let total = compute_total(Some(&combo), &state, &BeverageMenu::default()).unwrap();
//! assert_eq!(total.cents(), 5598);
//!
//! let order = assemble(Some(&combo), &state, total).unwrap();
//! assert_eq!(order.total(), total);
//! ```

pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod product;
pub mod selection;
pub mod validation;

pub use catalog::{Beverage, BeverageMenu, Topping, ToppingCatalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{assemble, LineItem, Order};
pub use pricing::{compute_total, price_breakdown, price_line_items, PriceBreakdown};
pub use product::{ProductDefinition, VariantAxis};
pub use selection::SelectionState;

/// Drink slots granted to a combo whose catalog entry does not state a limit.
pub const DEFAULT_DRINK_SLOT_LIMIT: usize = 4;
