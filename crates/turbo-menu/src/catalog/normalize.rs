//! Customization group normalization.
//!
//! Maps either catalog shape onto one ordered list of
//! [`CustomizationGroup`]s. Never fails: missing or malformed fields fall
//! back to permissive defaults.

use serde_json::Value;

use crate::catalog::{
    CatalogDocument, CustomizationGroup, CustomizationShape, GroupDocument, MenuOption,
};
use crate::config::CatalogConfig;
use crate::ids::GroupId;
use crate::money::Money;

/// Normalize a document's groups with default settings.
pub fn normalize(doc: &CatalogDocument) -> Vec<CustomizationGroup> {
    normalize_with(doc, &CatalogConfig::default())
}

/// Normalize a document's groups.
pub fn normalize_with(doc: &CatalogDocument, config: &CatalogConfig) -> Vec<CustomizationGroup> {
    match doc.shape() {
        CustomizationShape::None => Vec::new(),
        CustomizationShape::Combo(raw) => {
            let id = raw
                .id
                .clone()
                .unwrap_or_else(|| config.combo_group_id.clone());
            let name = raw
                .name
                .clone()
                .unwrap_or_else(|| config.combo_group_name.clone());
            vec![normalize_group(raw, GroupId::new(id.trim()), name, config)]
        }
        CustomizationShape::Groups(raws) => raws
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let id = match (&raw.id, &raw.name) {
                    (Some(id), _) => id.trim().to_string(),
                    (None, Some(name)) => slug(name),
                    (None, None) => format!("group-{}", index + 1),
                };
                let name = raw.name.clone().unwrap_or_else(|| id.clone());
                normalize_group(raw, GroupId::new(id), name, config)
            })
            .collect(),
    }
}

fn normalize_group(
    raw: &GroupDocument,
    id: GroupId,
    name: String,
    config: &CatalogConfig,
) -> CustomizationGroup {
    let min = bound(&raw.min).unwrap_or(0);
    let mut max = bound(&raw.max).unwrap_or(config.unbounded_max_picks);
    if max < min {
        tracing::warn!(group = %id, min, max, "Group maximum below minimum, raising maximum");
        max = min;
    }

    let options = raw
        .options
        .iter()
        .filter_map(|option| {
            let option_name = option.name.trim();
            if option_name.is_empty() {
                tracing::warn!(group = %id, "Dropping option without a name");
                return None;
            }
            Some(MenuOption {
                name: option_name.to_string(),
                price: price(&option.price, &id, option_name),
                image: option.image.clone(),
            })
        })
        .collect();

    CustomizationGroup {
        id,
        name,
        min,
        max,
        options,
    }
}

/// Read a pick bound. Missing, negative or unparseable values give `None`.
fn bound(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    Some(number.trunc().min(f64::from(u32::MAX)) as u32)
}

fn price(value: &Value, group: &GroupId, option: &str) -> Money {
    if !matches!(value, Value::Null | Value::Number(_) | Value::String(_)) {
        tracing::warn!(group = %group, option, "Unreadable option price, using zero");
    }
    Money::from_value(value)
}

fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn groups_of(value: Value) -> Vec<CustomizationGroup> {
        normalize(&CatalogDocument::from_value(&value))
    }

    #[test]
    fn test_plain_item_has_no_groups() {
        assert!(groups_of(json!({ "id": "water", "price": 3 })).is_empty());
    }

    #[test]
    fn test_modern_groups() {
        let groups = groups_of(json!({
            "id": "burger",
            "groups": [
                { "id": "extras", "name": "Extras", "min": 0, "max": 3,
                  "options": [{ "name": "Cheese", "price": 3 }, { "name": "Bacon", "price": "4,00" }] },
                { "id": "sauce", "name": "Sauce", "min": 1, "max": 1,
                  "options": [{ "name": "Ketchup" }] }
            ]
        }));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id.as_str(), "extras");
        assert_eq!(groups[0].max, 3);
        assert_eq!(groups[0].options[1].price.cents(), 400);
        assert_eq!(groups[1].min, 1);
        assert!(groups[1].options[0].price.is_zero());
    }

    #[test]
    fn test_legacy_combo() {
        let groups = groups_of(json!({
            "id": "meal",
            "is_combo": true,
            "combo": { "max": 2, "options": [{ "name": "Fries", "price": 5 }] }
        }));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id.as_str(), "combo");
        assert_eq!(groups[0].name, "Combo");
        assert_eq!(groups[0].min, 0);
        assert_eq!(groups[0].max, 2);
    }

    #[test]
    fn test_combo_uses_configured_names() {
        let config = CatalogConfig {
            combo_group_id: "meal-deal".to_string(),
            combo_group_name: "Meal deal".to_string(),
            ..CatalogConfig::default()
        };
        let doc = CatalogDocument::from_value(&json!({
            "id": "meal", "is_combo": true, "combo": { "options": [] }
        }));
        let groups = normalize_with(&doc, &config);
        assert_eq!(groups[0].id.as_str(), "meal-deal");
        assert_eq!(groups[0].name, "Meal deal");
    }

    #[test]
    fn test_missing_bounds_are_permissive() {
        let groups = groups_of(json!({
            "id": "pizza",
            "groups": [{ "name": "Toppings", "options": [{ "name": "Olives" }] }]
        }));
        assert_eq!(groups[0].min, 0);
        assert_eq!(groups[0].max, 999);
    }

    #[test]
    fn test_configured_sentinel() {
        let config = CatalogConfig {
            unbounded_max_picks: 10,
            ..CatalogConfig::default()
        };
        let doc = CatalogDocument::from_value(&json!({ "groups": [{ "name": "Toppings" }] }));
        assert_eq!(normalize_with(&doc, &config)[0].max, 10);
    }

    #[test]
    fn test_malformed_bounds() {
        let groups = groups_of(json!({
            "groups": [
                { "name": "A", "min": "2", "max": "4.7" },
                { "name": "B", "min": -1, "max": "lots" },
                { "name": "C", "min": 3, "max": 1 }
            ]
        }));
        assert_eq!((groups[0].min, groups[0].max), (2, 4));
        assert_eq!((groups[1].min, groups[1].max), (0, 999));
        assert_eq!((groups[2].min, groups[2].max), (3, 3));
    }

    #[test]
    fn test_missing_group_ids() {
        let groups = groups_of(json!({
            "groups": [{ "name": "Pick Your Sauce" }, {}]
        }));
        assert_eq!(groups[0].id.as_str(), "pick-your-sauce");
        assert_eq!(groups[1].id.as_str(), "group-2");
        assert_eq!(groups[1].name, "group-2");
    }

    #[test]
    fn test_nameless_options_dropped_duplicates_kept() {
        let groups = groups_of(json!({
            "groups": [{ "id": "extras", "options": [
                { "name": "Cheese" }, { "name": "  " }, { "name": "Cheese", "price": 1 }
            ] }]
        }));
        assert_eq!(groups[0].options.len(), 2);
        assert_eq!(groups[0].duplicate_option(), Some("Cheese"));
    }

    #[test]
    fn test_zero_max_is_kept() {
        let groups = groups_of(json!({ "groups": [{ "id": "none", "max": 0 }] }));
        assert_eq!(groups[0].max, 0);
    }
}
