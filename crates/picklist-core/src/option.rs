//! Dropdown option type.

use serde::{Deserialize, Serialize};

/// A single entry in the dropdown's option list.
///
/// `label` is display text and need not be unique. `value` is the caller's
/// identity key; selection correctness is always decided by value equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Display text shown in the list and button.
    pub label: String,

    /// Identity key owned by the caller.
    pub value: String,
}

impl DropdownOption {
    /// Create a new option with the given label and value.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Check identity against another option by value.
    pub fn same_value(&self, other: &DropdownOption) -> bool {
        self.value == other.value
    }
}
