//! Canonical catalog item and customization group types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{normalize_with, CatalogDocument};
use crate::config::CatalogConfig;
use crate::error::CartError;
use crate::ids::{GroupId, ItemId};
use crate::money::Money;

/// An orderable product with its customization groups already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Price before any options.
    pub base_price: Money,
    /// Image reference.
    pub image: Option<String>,
    /// Customization groups in display order.
    pub groups: Vec<CustomizationGroup>,
}

impl CatalogItem {
    /// Create a plain, non-configurable item.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, base_price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_price,
            image: None,
            groups: Vec::new(),
        }
    }

    /// Add a customization group.
    pub fn with_group(mut self, group: CustomizationGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Build from a catalog document with default settings.
    pub fn from_document(doc: &CatalogDocument) -> Self {
        Self::from_document_with(doc, &CatalogConfig::default())
    }

    /// Build from a catalog document, normalizing its groups once.
    pub fn from_document_with(doc: &CatalogDocument, config: &CatalogConfig) -> Self {
        Self {
            id: ItemId::new(doc.id.trim()),
            name: doc.name.clone(),
            base_price: Money::from_value(&doc.price),
            image: doc.image.clone(),
            groups: normalize_with(doc, config),
        }
    }

    /// Look up a group by id.
    pub fn group(&self, id: &GroupId) -> Option<&CustomizationGroup> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// Check whether the item has anything to customize.
    pub fn is_configurable(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Report catalog data that would make variant keys ambiguous.
    pub fn check_integrity(&self) -> Result<(), CartError> {
        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(&group.id) {
                return Err(CartError::DuplicateGroupId {
                    group: group.id.to_string(),
                });
            }
            if let Some(option) = group.duplicate_option() {
                return Err(CartError::DuplicateOptionName {
                    group: group.id.to_string(),
                    option: option.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A named set of selectable options with pick bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationGroup {
    /// Group identifier.
    pub id: GroupId,
    /// Display name.
    pub name: String,
    /// Minimum picks.
    pub min: u32,
    /// Maximum picks. Zero means nothing may be picked.
    pub max: u32,
    /// Options in display order.
    pub options: Vec<MenuOption>,
}

impl CustomizationGroup {
    /// Create an empty group.
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>, min: u32, max: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            min,
            max,
            options: Vec::new(),
        }
    }

    /// Add an option.
    pub fn with_option(mut self, name: impl Into<String>, price: Money) -> Self {
        self.options.push(MenuOption::new(name, price));
        self
    }

    /// Look up an option by name.
    pub fn option(&self, name: &str) -> Option<&MenuOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Whether at least one pick is required.
    pub fn is_required(&self) -> bool {
        self.min > 0
    }

    /// First option name that appears more than once.
    pub fn duplicate_option(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.options
            .iter()
            .map(|o| o.name.as_str())
            .find(|name| !seen.insert(*name))
    }
}

/// One selectable choice within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOption {
    /// Name, unique within its group.
    pub name: String,
    /// Price added per unit.
    pub price: Money,
    /// Image reference.
    pub image: Option<String>,
}

impl MenuOption {
    /// Create an option without an image.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            price,
            image: None,
        }
    }
}
