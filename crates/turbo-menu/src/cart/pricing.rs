//! Cart pricing calculations.
//!
//! Every option adds its price once per unit; the line total is the unit
//! price times the line quantity. All amounts are exact cents.

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::catalog::CatalogItem;
use crate::identity::VariantKey;
use crate::money::Money;
use crate::selection::Selection;

/// Base price plus the price of every selected option.
///
/// Options the item does not know contribute nothing.
pub fn unit_price(item: &CatalogItem, selections: &[Selection]) -> Money {
    selections.iter().fold(item.base_price, |total, selection| {
        let Some(group) = item.group(&selection.group) else {
            return total;
        };
        selection
            .options
            .iter()
            .filter_map(|name| group.option(name))
            .fold(total, |acc, option| acc + option.price)
    })
}

/// Snapshot unit price times quantity.
pub fn line_total(line: &CartLine) -> Money {
    line.unit_price * line.quantity
}

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of all line totals.
    pub subtotal: Money,
    /// Sum of all line quantities.
    pub total_quantity: i64,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
}

impl CartPricing {
    /// Check if there is nothing to pay for.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pricing breakdown for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub key: VariantKey,
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price * quantity
    pub total: Money,
}

impl From<&CartLine> for LinePricing {
    fn from(line: &CartLine) -> Self {
        Self {
            key: line.key.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            total: line_total(line),
        }
    }
}
