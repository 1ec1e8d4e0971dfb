//! Catalog read contract.

use std::collections::HashMap;

use crate::catalog::{CatalogDocument, CatalogItem};
use crate::config::CatalogConfig;
use crate::ids::ItemId;

/// Synchronous, in-memory catalog lookup.
///
/// Any remote fetch must complete before items reach the cart.
pub trait CatalogSource {
    /// Look up an item by id.
    fn item(&self, id: &ItemId) -> Option<CatalogItem>;
}

/// A `HashMap`-backed catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    items: HashMap<ItemId, CatalogItem>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and index a batch of documents. Later ids replace earlier ones.
    pub fn from_documents<'a>(
        docs: impl IntoIterator<Item = &'a CatalogDocument>,
        config: &CatalogConfig,
    ) -> Self {
        let mut catalog = Self::new();
        for doc in docs {
            catalog.insert(CatalogItem::from_document_with(doc, config));
        }
        catalog
    }

    /// Insert or replace an item.
    pub fn insert(&mut self, item: CatalogItem) -> Option<CatalogItem> {
        self.items.insert(item.id.clone(), item)
    }

    /// Borrow an item.
    pub fn get(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.items.get(id)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogSource for MemoryCatalog {
    fn item(&self, id: &ItemId) -> Option<CatalogItem> {
        self.items.get(id).cloned()
    }
}
