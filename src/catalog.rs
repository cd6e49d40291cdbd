//! Catalog collaborators.
//!
//! The engine never owns catalog data; it resolves SKU references through the
//! [`SkuResolver`] trait and propagates lookup failures unchanged.

use mockall::automock;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::uuids::uuid_newtype;

uuid_newtype! {
    /// SKU identifier.
    SkuUuid
}

/// Catalog lookup errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The SKU id is unknown to the catalog.
    #[error("sku {0} not found")]
    SkuNotFound(SkuUuid),

    /// Underlying catalog storage failed.
    #[error("catalog storage error: {0}")]
    Storage(String),
}

/// A purchasable catalog unit; read-only to the pricing engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Sku {
    /// SKU UUID.
    pub uuid: SkuUuid,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Money<'static, Currency>,
}

/// Resolves SKU references to catalog units.
#[automock]
pub trait SkuResolver: Send + Sync {
    /// Resolve a single SKU by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::SkuNotFound`] when the id is unknown.
    fn sku(&self, uuid: SkuUuid) -> Result<Sku, CatalogError>;
}

/// In-memory SKU catalog, used by fixtures and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    skus: FxHashMap<SkuUuid, Sku>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a SKU to the catalog, replacing any previous entry with the same
    /// id.
    pub fn insert(&mut self, sku: Sku) {
        self.skus.insert(sku.uuid, sku);
    }
}

impl SkuResolver for InMemoryCatalog {
    fn sku(&self, uuid: SkuUuid) -> Result<Sku, CatalogError> {
        self.skus
            .get(&uuid)
            .cloned()
            .ok_or(CatalogError::SkuNotFound(uuid))
    }
}
