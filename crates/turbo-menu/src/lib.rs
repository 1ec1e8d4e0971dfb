//! Menu customization, cart composition and pricing for TurboCommerce food ordering.
//!
//! This crate turns a catalog item plus a customer's customization choices
//! into canonical cart lines:
//!
//! - **Catalog**: Loose catalog documents normalized into customization groups
//! - **Selection**: Per-group min/max validation of chosen options
//! - **Identity**: Order-independent variant keys for merging repeat adds
//! - **Cart**: Merge-on-add cart store with exact, cents-based pricing
//!
//! # Example
//!
//! ```rust
//! use turbo_menu::prelude::*;
//!
//! let burger = CatalogItem::new("burger", "Burger", Money::parse("29.90")).with_group(
//!     CustomizationGroup::new("extras", "Extras", 0, 3)
//!         .with_option("Cheese", Money::parse("3.00"))
//!         .with_option("Bacon", Money::parse("4.00")),
//! );
//!
//! let mut cart = Cart::new();
//! let key = cart.add(&burger, &[Selection::new("extras", ["Cheese"])], 1)?;
//! cart.add(&burger, &[Selection::new("extras", ["Cheese"])], 1)?;
//!
//! assert_eq!(cart.get(&key).map(|line| line.quantity), Some(2));
//! assert_eq!(cart.subtotal().to_string(), "65.80");
//! # Ok::<(), turbo_menu::CartError>(())
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod ids;
pub mod money;
pub mod selection;

pub mod cart;
pub mod catalog;

pub use config::MenuConfig;
pub use error::{CartError, SelectionError};
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{CartConfig, CatalogConfig, MenuConfig};
    pub use crate::error::{CartError, SelectionError};
    pub use crate::identity::{identity_of, VariantKey};
    pub use crate::ids::*;
    pub use crate::money::Money;
    pub use crate::selection::{validate, validate_all, Selection};

    // Catalog
    pub use crate::catalog::{
        normalize, CatalogDocument, CatalogItem, CatalogSource, CustomizationGroup,
        MemoryCatalog, MenuOption,
    };

    // Cart
    pub use crate::cart::{
        line_total, unit_price, Cart, CartLine, CartPricing, CartSnapshot, LinePricing,
    };
}
