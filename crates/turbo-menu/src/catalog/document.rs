//! Loose catalog document shapes as published by the catalog store.
//!
//! Every field is optional and tolerant of the wrong JSON type: catalog
//! data comes from a less-trusted system and must not fail to load.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A catalog item exactly as the catalog store publishes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Base price, a number or a string with `.` or `,` decimals.
    pub price: Value,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub image: Option<String>,
    /// Activates the legacy single `combo` block.
    #[serde(alias = "isCombo", deserialize_with = "lenient_flag")]
    pub is_combo: bool,
    /// Legacy single customization block.
    #[serde(deserialize_with = "lenient_opt")]
    pub combo: Option<GroupDocument>,
    /// Modern list of customization groups.
    #[serde(
        alias = "groups",
        alias = "customizationGroups",
        deserialize_with = "lenient_opt_vec"
    )]
    pub customization_groups: Option<Vec<GroupDocument>>,
}

/// Which customization shape a document uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomizationShape<'a> {
    /// Plain product.
    None,
    /// Legacy flag-activated single group.
    Combo(&'a GroupDocument),
    /// Explicit group list.
    Groups(&'a [GroupDocument]),
}

impl CatalogDocument {
    /// Read a document from an arbitrary JSON value.
    ///
    /// A value that is not an object yields an empty document.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unreadable catalog document, using empty item");
            Self::default()
        })
    }

    /// Resolve the customization shape. A non-empty group list wins over a
    /// combo block; a combo block only counts when flagged.
    pub fn shape(&self) -> CustomizationShape<'_> {
        match (&self.customization_groups, &self.combo) {
            (Some(groups), _) if !groups.is_empty() => CustomizationShape::Groups(groups),
            (_, Some(combo)) if self.is_combo => CustomizationShape::Combo(combo),
            _ => CustomizationShape::None,
        }
    }
}

/// One customization group in a catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupDocument {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,
    #[serde(alias = "title", deserialize_with = "lenient_opt_string")]
    pub name: Option<String>,
    #[serde(alias = "minimum", alias = "min_picks")]
    pub min: Value,
    #[serde(alias = "maximum", alias = "max_picks")]
    pub max: Value,
    #[serde(alias = "items", deserialize_with = "lenient_vec")]
    pub options: Vec<OptionDocument>,
}

/// One option in a catalog document group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionDocument {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(alias = "additional_price", alias = "additionalPrice")]
    pub price: Value,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub image: Option<String>,
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value).unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value).filter(|s| !s.trim().is_empty()))
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    })
}

fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient_opt_vec(deserializer)?.unwrap_or_default())
}

fn lenient_opt_vec<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(entries) => Some(
            entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect(),
        ),
        _ => None,
    })
}
