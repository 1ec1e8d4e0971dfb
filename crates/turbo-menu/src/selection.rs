//! Customization selections and their validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::CustomizationGroup;
use crate::error::SelectionError;
use crate::ids::GroupId;

/// The options chosen in one group for one cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Group the options belong to.
    pub group: GroupId,
    /// Chosen option names, in pick order.
    pub options: Vec<String>,
}

impl Selection {
    /// Create a selection.
    pub fn new<S: Into<String>>(
        group: impl Into<GroupId>,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            group: group.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if nothing was chosen.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Sort options within each selection, drop empty selections and sort by group.
pub fn canonicalize(selections: &[Selection]) -> Vec<Selection> {
    let mut canonical: Vec<Selection> = selections
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| {
            let mut options = s.options.clone();
            options.sort();
            Selection {
                group: s.group.clone(),
                options,
            }
        })
        .collect();
    canonical.sort_by(|a, b| a.group.cmp(&b.group));
    canonical
}

/// Validate one group's choices.
///
/// Checks, in order: unknown options, the minimum, the maximum, duplicates.
pub fn validate(group: &CustomizationGroup, chosen: &[String]) -> Result<(), SelectionError> {
    if let Some(unknown) = chosen.iter().find(|name| group.option(name).is_none()) {
        return Err(SelectionError::InvalidOption {
            group: group.name.clone(),
            option: unknown.clone(),
        });
    }

    if chosen.len() < group.min as usize {
        return Err(SelectionError::BelowMinimum {
            group: group.name.clone(),
            min: group.min,
            chosen: chosen.len(),
        });
    }

    if chosen.len() > group.max as usize {
        return Err(SelectionError::AboveMaximum {
            group: group.name.clone(),
            max: group.max,
            chosen: chosen.len(),
        });
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = chosen.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(SelectionError::DuplicateOption {
            group: group.name.clone(),
            option: duplicate.clone(),
        });
    }

    Ok(())
}

/// Validate a full selection set against an item's normalized groups.
///
/// Every group is checked, including groups with no selection, so a
/// required group left untouched fails with `BelowMinimum`.
pub fn validate_all(
    groups: &[CustomizationGroup],
    selections: &[Selection],
) -> Result<(), SelectionError> {
    let mut seen = HashSet::new();
    for selection in selections {
        if !groups.iter().any(|g| g.id == selection.group) {
            return Err(SelectionError::UnknownGroup {
                group: selection.group.to_string(),
            });
        }
        if !seen.insert(&selection.group) {
            return Err(SelectionError::DuplicateGroup {
                group: selection.group.to_string(),
            });
        }
    }

    for group in groups {
        let chosen = selections
            .iter()
            .find(|s| s.group == group.id)
            .map(|s| s.options.as_slice())
            .unwrap_or_default();
        validate(group, chosen)?;
    }

    Ok(())
}
