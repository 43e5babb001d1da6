//! # Catalog Service
//!
//! The contract through which definitions reach the engine.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog Service                       crust-core                       │
//! │                                                                         │
//! │  get_product(id)  ──────────────────►  ProductDefinition                │
//! │  get_toppings()   ──────────────────►  ToppingCatalog                   │
//! │  get_beverages()  ──────────────────►  BeverageMenu                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations own transport, caching and retries. The engine only sees
//! the values they return.

pub mod memory;
pub mod wire;

use std::future::Future;

use crust_core::{Beverage, ProductDefinition, Topping};

use crate::error::CatalogResult;

/// Source of product, topping and beverage definitions.
pub trait CatalogService: Send + Sync {
    /// Fetches one product definition.
    fn get_product(
        &self,
        id: &str,
    ) -> impl Future<Output = CatalogResult<ProductDefinition>> + Send;

    /// Fetches the toppings on offer (shared by every toppable product).
    fn get_toppings(&self) -> impl Future<Output = CatalogResult<Vec<Topping>>> + Send;

    /// Fetches the beverages with their unit prices.
    fn get_beverages(&self) -> impl Future<Output = CatalogResult<Vec<Beverage>>> + Send;
}
