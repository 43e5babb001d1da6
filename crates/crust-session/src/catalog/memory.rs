//! In-memory [`CatalogService`] backed by a [`CatalogDocument`].
//!
//! Used for fixtures, demos and tests; a deployment would put an HTTP client
//! behind the same trait.

use std::collections::BTreeMap;

use crust_core::{Beverage, ProductDefinition, Topping, DEFAULT_DRINK_SLOT_LIMIT};
use tracing::debug;

use super::wire::{CatalogDocument, CatalogProduct};
use super::CatalogService;
use crate::config::SessionConfig;
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    products: BTreeMap<String, CatalogProduct>,
    toppings: Vec<Topping>,
    default_drink_slot_limit: usize,
}

impl InMemoryCatalog {
    pub fn from_document(document: CatalogDocument) -> Self {
        InMemoryCatalog {
            products: document
                .products
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
            toppings: document.toppings.into_iter().map(Topping::from).collect(),
            default_drink_slot_limit: DEFAULT_DRINK_SLOT_LIMIT,
        }
    }

    /// Parses a catalog document from JSON.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        Ok(InMemoryCatalog::from_document(document))
    }

    /// Drink slots for combos that do not state their own limit.
    pub fn with_default_drink_slot_limit(mut self, limit: usize) -> Self {
        self.default_drink_slot_limit = limit;
        self
    }

    /// Applies the catalog-related settings of `config`.
    pub fn with_config(self, config: &SessionConfig) -> Self {
        self.with_default_drink_slot_limit(config.default_drink_slot_limit)
    }

    pub fn product_ids(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }
}

impl CatalogService for InMemoryCatalog {
    async fn get_product(&self, id: &str) -> CatalogResult<ProductDefinition> {
        debug!(product_id = %id, "catalog lookup");
        let record = self
            .products
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        record.to_definition(self.default_drink_slot_limit)
    }

    async fn get_toppings(&self) -> CatalogResult<Vec<Topping>> {
        Ok(self.toppings.clone())
    }

    async fn get_beverages(&self) -> CatalogResult<Vec<Beverage>> {
        self.products
            .values()
            .filter(|p| p.is_beverage())
            .map(CatalogProduct::to_beverage)
            .collect()
    }
}
