//! Plain-data cart representation for host-side persistence.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cart::{Cart, CartLine};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::identity::identity_of;
use crate::ids::ItemId;
use crate::money::Money;
use crate::selection::{canonicalize, Selection};

/// A cart as plain data, e.g. for local storage between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    #[serde(default)]
    pub lines: Vec<LineSnapshot>,
}

/// One cart line as plain data. Keys are not stored; they are re-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub item_id: ItemId,
    pub name: String,
    pub base_price: Money,
    pub unit_price: Money,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub selections: Vec<Selection>,
    pub quantity: i64,
}

impl From<&CartLine> for LineSnapshot {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.item_id.clone(),
            name: line.name.clone(),
            base_price: line.base_price,
            unit_price: line.unit_price,
            image: line.image.clone(),
            selections: line.selections.clone(),
            quantity: line.quantity,
        }
    }
}

impl Cart {
    /// Capture the cart as plain data.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines().iter().map(LineSnapshot::from).collect(),
        }
    }

    /// Rebuild a cart from plain data.
    ///
    /// Keys are re-derived from item id and selections, lines whose keys
    /// coincide are merged, and lines with a non-positive quantity are
    /// dropped. Stored prices are kept as the line snapshot.
    pub fn restore(snapshot: CartSnapshot, config: CartConfig) -> Self {
        let mut cart = Cart::with_config(config);
        for line in snapshot.lines {
            if line.quantity <= 0 {
                debug!(item = %line.item_id, quantity = line.quantity, "Dropping empty stored line");
                continue;
            }
            let selections = canonicalize(&line.selections);
            cart.absorb(CartLine {
                key: identity_of(&line.item_id, &selections),
                item_id: line.item_id,
                name: line.name,
                base_price: line.base_price,
                image: line.image,
                selections,
                unit_price: line.unit_price,
                quantity: line.quantity,
            });
        }
        debug!(lines = cart.len(), "Restored cart");
        cart
    }

    /// Serialize the cart snapshot as JSON.
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Restore a cart from snapshot JSON.
    pub fn from_json(json: &str, config: CartConfig) -> Result<Self, CartError> {
        let snapshot: CartSnapshot = serde_json::from_str(json)?;
        Ok(Self::restore(snapshot, config))
    }
}
