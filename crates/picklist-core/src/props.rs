//! Widget props supplied by the host application.
//!
//! The host app builder feeds widget configuration as JSON (camelCase keys,
//! matching its page definition format). Only fields that affect selection
//! and filtering semantics live here, plus the pass-through render flags the
//! view layer needs; colors, radii, shadows and label styling belong to the
//! view layer and never reach the engine.

use crate::{DropdownOption, FilterMode, PropsError};
use serde::{Deserialize, Serialize};

/// Rendered when no option is committed.
pub const DEFAULT_PLACEHOLDER: &str = "-- Select --";

/// Configuration for one dropdown instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownProps {
    /// Ordered option list. Owned by the host; the engine only indexes into it.
    pub options: Vec<DropdownOption>,

    /// Committed selection, externally owned. Out-of-range means unselected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_index: Option<usize>,

    /// Text rendered when nothing is selected.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Whether the search input is shown at all.
    #[serde(default)]
    pub is_filterable: bool,

    /// Selects remote filtering over local fuzzy matching.
    #[serde(default)]
    pub server_side_filtering: bool,

    /// Pass-through: the view renders a disabled button.
    #[serde(default)]
    pub disabled: bool,

    /// Pass-through: the view renders a loading skeleton.
    #[serde(default)]
    pub is_loading: bool,

    /// Pass-through: the view renders validation styling.
    #[serde(default = "default_true")]
    pub is_valid: bool,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DropdownProps {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            selected_index: None,
            placeholder: default_placeholder(),
            is_filterable: false,
            server_side_filtering: false,
            disabled: false,
            is_loading: false,
            is_valid: true,
        }
    }
}

impl DropdownProps {
    /// Parse props from the host's JSON page definition.
    pub fn from_json(json: &str) -> Result<Self, PropsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The filter mode implied by `server_side_filtering`.
    pub fn filter_mode(&self) -> FilterMode {
        if self.server_side_filtering {
            FilterMode::Remote
        } else {
            FilterMode::Local
        }
    }
}
