//! Menu and cart error types.

use thiserror::Error;

/// A rejected customization choice.
///
/// Returned to the host so it can render an inline message; none of these
/// are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Option name is not present in its group.
    #[error("Choice no longer available: {option} in {group}")]
    InvalidOption { group: String, option: String },

    /// Fewer options chosen than the group requires.
    #[error("Choose at least {min} in {group} (chose {chosen})")]
    BelowMinimum {
        group: String,
        min: u32,
        chosen: usize,
    },

    /// More options chosen than the group allows.
    #[error("Choose at most {max} in {group} (chose {chosen})")]
    AboveMaximum {
        group: String,
        max: u32,
        chosen: usize,
    },

    /// Same option chosen twice in one group.
    #[error("{option} chosen more than once in {group}")]
    DuplicateOption { group: String, option: String },

    /// Selection refers to a group the item does not have.
    #[error("Unknown customization group: {group}")]
    UnknownGroup { group: String },

    /// Two selections were given for one group.
    #[error("Customization group {group} selected more than once")]
    DuplicateGroup { group: String },
}

/// Errors returned by cart operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Selection failed validation.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Catalog item carries two options with the same name in one group.
    #[error("Catalog data error: option {option} appears twice in group {group}")]
    DuplicateOptionName { group: String, option: String },

    /// Catalog item carries two groups with the same id.
    #[error("Catalog data error: group {group} appears twice")]
    DuplicateGroupId { group: String },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Catalog item not found.
    #[error("Catalog item not found: {0}")]
    ItemNotFound(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for CartError {
    fn from(e: toml::de::Error) -> Self {
        CartError::Config(e.to_string())
    }
}
