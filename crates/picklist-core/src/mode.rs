//! Filter mode types.

use serde::{Deserialize, Serialize};

/// How the dropdown filters its options as the user types.
///
/// The mode is fixed for the lifetime of one control instance; it is set by
/// configuration, not by user action.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Fuzzy match synchronously over the fully loaded option list.
    #[default]
    Local,
    /// Delegate filtering to an external source via debounced requests.
    Remote,
}

impl FilterMode {
    /// Check whether filtering is delegated to an external source.
    pub fn is_remote(&self) -> bool {
        matches!(self, FilterMode::Remote)
    }
}
