//! Variant identity: the canonical key of an item plus its selections.
//!
//! Two adds of the same item with the same choices, picked in any order,
//! share a key. Adds differing in any option never do.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::selection::Selection;

/// Canonical, order-independent identity of a configured item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantKey(String);

impl VariantKey {
    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VariantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the variant key for an item and its selections.
///
/// Options are sorted within each group and groups are sorted by id before
/// serialization. Empty selections are ignored; with nothing selected the
/// key is the item id itself, unless the id starts with `[` and could pass
/// for a serialized key, in which case it is serialized as `[id, {}]`.
pub fn identity_of(item_id: &ItemId, selections: &[Selection]) -> VariantKey {
    let mut sorted: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for selection in selections.iter().filter(|s| !s.is_empty()) {
        sorted
            .entry(selection.group.as_str())
            .or_default()
            .extend(selection.options.iter().map(String::as_str));
    }

    if sorted.is_empty() && !item_id.as_str().starts_with('[') {
        return VariantKey(item_id.as_str().to_string());
    }
    for options in sorted.values_mut() {
        options.sort_unstable();
    }

    // Serializing strings and string maps cannot fail.
    let key = serde_json::to_string(&(item_id.as_str(), &sorted))
        .unwrap_or_else(|_| format!("{}{:?}", item_id, sorted));
    VariantKey(key)
}
