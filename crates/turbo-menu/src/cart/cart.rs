//! Cart and cart line types.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cart::{line_total, unit_price, CartPricing, LinePricing};
use crate::catalog::{CatalogItem, CatalogSource};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::identity::{identity_of, VariantKey};
use crate::ids::ItemId;
use crate::money::Money;
use crate::selection::{canonicalize, validate_all, Selection};

/// A session's cart: insertion-ordered lines with unique variant keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    config: CartConfig,
}

impl Cart {
    /// Create an empty cart with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart with the given settings.
    ///
    /// A quantity ceiling below 1 is raised to 1.
    pub fn with_config(mut config: CartConfig) -> Self {
        if config.max_quantity_per_line < 1 {
            warn!(
                max = config.max_quantity_per_line,
                "Cart quantity ceiling below 1, using 1"
            );
            config.max_quantity_per_line = 1;
        }
        Self {
            lines: Vec::new(),
            config,
        }
    }

    /// Cart settings.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Add a configured item to the cart.
    ///
    /// Validates every group of the item before touching the cart. A repeat
    /// of an existing variant increases that line's quantity; otherwise a
    /// new line is created with a price snapshot.
    ///
    /// Returns an error, leaving the cart unchanged, if:
    /// - Quantity is not positive
    /// - The item's catalog data has duplicate group ids or option names
    /// - Any selection fails validation
    /// - The line would exceed the configured quantity ceiling
    pub fn add(
        &mut self,
        item: &CatalogItem,
        selections: &[Selection],
        quantity: i64,
    ) -> Result<VariantKey, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        item.check_integrity()
            .and_then(|()| validate_all(&item.groups, selections).map_err(CartError::from))
            .inspect_err(|e| debug!(item = %item.id, reason = %e, "Rejected cart add"))?;

        let selections = canonicalize(selections);
        let key = identity_of(&item.id, &selections);
        let max = self.max_quantity();

        if let Some(existing) = self.lines.iter_mut().find(|l| l.key == key) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .filter(|q| *q <= max)
                .ok_or_else(|| {
                    CartError::QuantityExceedsLimit(existing.quantity.saturating_add(quantity), max)
                })?;
            existing.quantity = new_quantity;
            debug!(key = %key, quantity = new_quantity, "Merged into existing cart line");
            return Ok(key);
        }

        if quantity > max {
            return Err(CartError::QuantityExceedsLimit(quantity, max));
        }

        let line = CartLine::new(key.clone(), item, selections, quantity);
        debug!(key = %key, quantity, unit_price = %line.unit_price, "Added cart line");
        self.lines.push(line);
        Ok(key)
    }

    /// Resolve an item from a catalog and add it.
    pub fn add_from_catalog<C: CatalogSource + ?Sized>(
        &mut self,
        catalog: &C,
        item_id: &ItemId,
        selections: &[Selection],
        quantity: i64,
    ) -> Result<VariantKey, CartError> {
        let item = catalog
            .item(item_id)
            .ok_or_else(|| CartError::ItemNotFound(item_id.to_string()))?;
        self.add(&item, selections, quantity)
    }

    /// Set a line's quantity to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the line. Unknown keys are
    /// ignored. Returns whether a line was affected, or an error, leaving
    /// the line unchanged, if the quantity exceeds the ceiling.
    pub fn set_quantity(&mut self, key: &VariantKey, quantity: i64) -> Result<bool, CartError> {
        if quantity <= 0 {
            return Ok(self.remove(key).is_some());
        }

        let max = self.max_quantity();
        let Some(line) = self.lines.iter_mut().find(|l| &l.key == key) else {
            debug!(key = %key, "Quantity update for unknown cart line ignored");
            return Ok(false);
        };

        if quantity > max {
            return Err(CartError::QuantityExceedsLimit(quantity, max));
        }
        line.quantity = quantity;
        debug!(key = %key, quantity, "Updated cart line quantity");
        Ok(true)
    }

    /// Remove a line, returning it if it was present.
    pub fn remove(&mut self, key: &VariantKey) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| &l.key == key)?;
        let line = self.lines.remove(index);
        debug!(key = %key, "Removed cart line");
        Some(line)
    }

    /// Remove every line (checkout completion or explicit reset).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(line_total).sum()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get a line by key.
    pub fn get(&self, key: &VariantKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key == key)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Calculate the pricing breakdown.
    pub fn calculate_pricing(&self) -> CartPricing {
        CartPricing {
            subtotal: self.subtotal(),
            total_quantity: self.total_quantity(),
            lines: self.lines.iter().map(LinePricing::from).collect(),
        }
    }

    /// Merge another cart into this one (e.g., a guest cart at sign-in).
    ///
    /// Matching keys sum their quantities, capped at the ceiling. The
    /// existing line's price snapshot is kept.
    pub fn merge(&mut self, other: Cart) {
        for line in other.lines {
            self.absorb(line);
        }
    }

    /// Insert a line or fold it into the line with the same key.
    pub(crate) fn absorb(&mut self, mut line: CartLine) {
        let max = self.max_quantity();
        if let Some(existing) = self.lines.iter_mut().find(|l| l.key == line.key) {
            let wanted = existing.quantity.saturating_add(line.quantity);
            if wanted > max {
                warn!(key = %existing.key, wanted, max, "Cart line quantity clamped to ceiling");
            }
            existing.quantity = wanted.clamp(1, max);
            debug!(key = %existing.key, quantity = existing.quantity, "Merged cart line");
        } else {
            if line.quantity > max {
                warn!(
                    key = %line.key,
                    wanted = line.quantity,
                    max,
                    "Cart line quantity clamped to ceiling"
                );
            }
            line.quantity = line.quantity.clamp(1, max);
            self.lines.push(line);
        }
    }

    /// Quantity ceiling, never below 1.
    fn max_quantity(&self) -> i64 {
        self.config.max_quantity_per_line.max(1)
    }
}

/// One row of the cart.
///
/// Name, prices and image are captured when the line is created; later
/// catalog changes do not alter it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Variant key, unique within the cart.
    pub key: VariantKey,
    /// Originating catalog item.
    pub item_id: ItemId,
    /// Item name at add time.
    pub name: String,
    /// Item base price at add time.
    pub base_price: Money,
    /// Item image at add time.
    pub image: Option<String>,
    /// Canonical selections (sorted, no empty groups).
    pub selections: Vec<Selection>,
    /// Base price plus options at add time.
    pub unit_price: Money,
    /// Always at least 1.
    pub quantity: i64,
}

impl CartLine {
    fn new(key: VariantKey, item: &CatalogItem, selections: Vec<Selection>, quantity: i64) -> Self {
        let unit_price = unit_price(item, &selections);
        Self {
            key,
            item_id: item.id.clone(),
            name: item.name.clone(),
            base_price: item.base_price,
            image: item.image.clone(),
            selections,
            unit_price,
            quantity,
        }
    }

    /// unit_price * quantity
    pub fn total(&self) -> Money {
        line_total(self)
    }

    /// Chosen options for display (e.g., "Bacon, Cheese").
    pub fn description(&self) -> String {
        self.selections
            .iter()
            .flat_map(|s| s.options.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CustomizationGroup, MemoryCatalog};
    use crate::error::SelectionError;

    fn burger() -> CatalogItem {
        CatalogItem::new("burger", "Burger", Money::parse("29.90")).with_group(
            CustomizationGroup::new("extras", "Extras", 0, 3)
                .with_option("Cheese", Money::parse("3.00"))
                .with_option("Bacon", Money::parse("4.00")),
        )
    }

    fn combo() -> CatalogItem {
        CatalogItem::new("combo", "Combo", Money::parse("39.90")).with_group(
            CustomizationGroup::new("drink", "Drink", 1, 1)
                .with_option("Cola", Money::ZERO)
                .with_option("Juice", Money::parse("2.50")),
        )
    }

    fn cheese() -> Vec<Selection> {
        vec![Selection::new("extras", ["Cheese"])]
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let key = cart.add(&burger(), &cheese(), 1).unwrap();

        let line = cart.get(&key).unwrap();
        assert_eq!(line.unit_price.cents(), 3290);
        assert_eq!(line.total().cents(), 3290);
        assert_eq!(line.description(), "Cheese");
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_same_variant_increases_quantity() {
        let mut cart = Cart::new();
        let first = cart.add(&burger(), &cheese(), 1).unwrap();
        let second = cart.add(&burger(), &cheese(), 1).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&first).unwrap().quantity, 2);
        assert_eq!(cart.subtotal().cents(), 6580);
    }

    #[test]
    fn test_pick_order_does_not_split_lines() {
        let mut cart = Cart::new();
        cart.add(&burger(), &[Selection::new("extras", ["Bacon", "Cheese"])], 1)
            .unwrap();
        cart.add(&burger(), &[Selection::new("extras", ["Cheese", "Bacon"])], 2)
            .unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(&burger(), &cheese(), 0),
            Err(CartError::InvalidQuantity(0))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_rejected_add_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let key = cart.add(&combo(), &[Selection::new("drink", ["Cola"])], 1).unwrap();
        let before = cart.clone();

        let err = cart.add(&combo(), &[], 1).unwrap_err();
        assert!(matches!(
            err,
            CartError::Selection(SelectionError::BelowMinimum { min: 1, chosen: 0, .. })
        ));
        let err = cart
            .add(&combo(), &[Selection::new("drink", ["Cola", "Juice"])], 1)
            .unwrap_err();
        assert!(matches!(
            err,
            CartError::Selection(SelectionError::AboveMaximum { max: 1, .. })
        ));

        assert_eq!(cart, before);
        assert_eq!(cart.get(&key).unwrap().quantity, 1);
    }

    #[test]
    fn test_duplicate_catalog_option_rejected() {
        let mut item = burger();
        item.groups[0] = item.groups[0].clone().with_option("Cheese", Money::ZERO);
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add(&item, &cheese(), 1),
            Err(CartError::DuplicateOptionName { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_survives_catalog_change() {
        let mut cart = Cart::new();
        let key = cart.add(&burger(), &cheese(), 1).unwrap();

        let mut repriced = burger();
        repriced.base_price = Money::parse("35.00");
        repriced.name = "Big Burger".to_string();
        cart.add(&repriced, &cheese(), 1).unwrap();

        let line = cart.get(&key).unwrap();
        assert_eq!(line.name, "Burger");
        assert_eq!(line.unit_price.cents(), 3290);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        let key = cart.add(&burger(), &cheese(), 1).unwrap();

        assert_eq!(cart.set_quantity(&key, 5), Ok(true));
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_quantity_floor_removes_line() {
        let mut cart = Cart::new();
        let key = cart.add(&burger(), &cheese(), 1).unwrap();
        assert_eq!(cart.set_quantity(&key, 0), Ok(true));
        assert!(cart.is_empty());

        let key = cart.add(&burger(), &cheese(), 1).unwrap();
        assert_eq!(cart.set_quantity(&key, -5), Ok(true));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_key_is_noop() {
        let mut cart = Cart::new();
        cart.add(&burger(), &cheese(), 1).unwrap();
        let stale = identity_of(&ItemId::new("pizza"), &[]);
        assert_eq!(cart.set_quantity(&stale, 3), Ok(false));
        assert_eq!(cart.set_quantity(&stale, 0), Ok(false));
        assert_eq!(cart.set_quantity(&stale, 1_000_000), Ok(false));
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let key = cart.add(&burger(), &cheese(), 2).unwrap();
        assert_eq!(cart.remove(&key).unwrap().quantity, 2);
        assert!(cart.remove(&key).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::with_config(CartConfig {
            max_quantity_per_line: 5,
        });
        let key = cart.add(&burger(), &cheese(), 4).unwrap();
        assert_eq!(
            cart.add(&burger(), &cheese(), 2),
            Err(CartError::QuantityExceedsLimit(6, 5))
        );
        assert_eq!(cart.get(&key).unwrap().quantity, 4);
        assert!(cart.add(&burger(), &[], 6).is_err());

        assert_eq!(cart.set_quantity(&key, 5), Ok(true));
        assert_eq!(cart.get(&key).unwrap().quantity, 5);
        assert_eq!(
            cart.set_quantity(&key, 6),
            Err(CartError::QuantityExceedsLimit(6, 5))
        );
        assert_eq!(cart.get(&key).unwrap().quantity, 5);
    }

    #[test]
    fn test_non_positive_ceiling_keeps_quantities_positive() {
        let mut source = Cart::new();
        let key = source.add(&burger(), &cheese(), 3).unwrap();

        let mut cart = Cart::with_config(CartConfig {
            max_quantity_per_line: -2,
        });
        assert_eq!(cart.config().max_quantity_per_line, 1);
        cart.merge(source.clone());
        assert_eq!(cart.get(&key).unwrap().quantity, 1);

        assert_eq!(
            cart.set_quantity(&key, 4),
            Err(CartError::QuantityExceedsLimit(4, 1))
        );
        assert_eq!(cart.set_quantity(&key, 1), Ok(true));
        assert!(cart.lines().iter().all(|l| l.quantity >= 1));

        let restored = Cart::restore(
            source.snapshot(),
            CartConfig {
                max_quantity_per_line: 0,
            },
        );
        assert_eq!(restored.get(&key).unwrap().quantity, 1);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        let plain = cart.add(&burger(), &[], 1).unwrap();
        let drink = cart.add(&combo(), &[Selection::new("drink", ["Juice"])], 1).unwrap();
        let extra = cart.add(&burger(), &cheese(), 1).unwrap();
        cart.add(&burger(), &[], 1).unwrap();

        let keys: Vec<_> = cart.lines().iter().map(|l| l.key.clone()).collect();
        assert_eq!(keys, vec![plain, drink, extra]);
    }

    #[test]
    fn test_pricing() {
        let mut cart = Cart::new();
        cart.add(&burger(), &cheese(), 2).unwrap();
        cart.add(&combo(), &[Selection::new("drink", ["Juice"])], 1).unwrap();

        let pricing = cart.calculate_pricing();
        assert_eq!(pricing.subtotal.cents(), 2 * 3290 + 4240);
        assert_eq!(pricing.total_quantity, 3);
        assert_eq!(pricing.lines.len(), 2);
        assert_eq!(pricing.lines[1].unit_price.cents(), 4240);
    }

    #[test]
    fn test_merge_carts() {
        let mut account = Cart::new();
        account.add(&burger(), &cheese(), 1).unwrap();

        let mut guest = Cart::new();
        guest.add(&burger(), &cheese(), 2).unwrap();
        guest.add(&burger(), &[], 1).unwrap();

        account.merge(guest);
        assert_eq!(account.len(), 2);
        assert_eq!(account.total_quantity(), 4);
    }

    #[test]
    fn test_add_from_catalog() {
        let mut catalog = MemoryCatalog::new();
        catalog.insert(burger());

        let mut cart = Cart::new();
        cart.add_from_catalog(&catalog, &ItemId::new("burger"), &cheese(), 1)
            .unwrap();
        assert_eq!(
            cart.add_from_catalog(&catalog, &ItemId::new("pizza"), &[], 1),
            Err(CartError::ItemNotFound("pizza".to_string()))
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_independent_carts() {
        let mut a = Cart::new();
        let b = Cart::new();
        a.add(&burger(), &[], 1).unwrap();
        assert!(b.is_empty());
    }
}
