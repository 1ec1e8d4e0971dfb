//! Menu catalog module.
//!
//! Contains the loose catalog document shapes, the normalized item and
//! group types, and the catalog read contract.

mod document;
mod item;
mod normalize;
mod source;

pub use document::{CatalogDocument, CustomizationShape, GroupDocument, OptionDocument};
pub use item::{CatalogItem, CustomizationGroup, MenuOption};
pub use normalize::{normalize, normalize_with};
pub use source::{CatalogSource, MemoryCatalog};
