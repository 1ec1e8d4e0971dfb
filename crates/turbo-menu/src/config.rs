//! Menu and cart configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Sentinel maximum applied when a group does not declare one.
pub const DEFAULT_UNBOUNDED_MAX_PICKS: u32 = 999;

/// Maximum quantity allowed per cart line.
pub const DEFAULT_MAX_QUANTITY_PER_LINE: i64 = 9999;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Catalog normalization settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart settings.
    #[serde(default)]
    pub cart: CartConfig,
}

impl MenuConfig {
    /// Parse TOML configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, CartError> {
        let config: Self = toml::from_str(content)?;
        config.validate()
    }

    /// Parse JSON configuration.
    pub fn from_json_str(content: &str) -> Result<Self, CartError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| CartError::Config(e.to_string()))?;
        config.validate()
    }

    /// Load config from a file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CartError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    fn validate(self) -> Result<Self, CartError> {
        if self.cart.max_quantity_per_line < 1 {
            return Err(CartError::Config(format!(
                "cart.max_quantity_per_line must be at least 1, got {}",
                self.cart.max_quantity_per_line
            )));
        }
        Ok(self)
    }
}

/// Catalog normalization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Maximum picks assumed when a group omits its maximum.
    pub unbounded_max_picks: u32,
    /// Group id given to a legacy combo block without one.
    pub combo_group_id: String,
    /// Group name given to a legacy combo block without one.
    pub combo_group_name: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            unbounded_max_picks: DEFAULT_UNBOUNDED_MAX_PICKS,
            combo_group_id: "combo".to_string(),
            combo_group_name: "Combo".to_string(),
        }
    }
}

/// Cart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Ceiling for a single line's quantity.
    pub max_quantity_per_line: i64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            max_quantity_per_line: DEFAULT_MAX_QUANTITY_PER_LINE,
        }
    }
}
