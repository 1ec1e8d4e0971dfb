//! Cart module.
//!
//! Contains the cart store, cart lines, pricing and persistence snapshots.

mod cart;
mod pricing;
mod snapshot;

pub use cart::{Cart, CartLine};
pub use pricing::{line_total, unit_price, CartPricing, LinePricing};
pub use snapshot::{CartSnapshot, LineSnapshot};
