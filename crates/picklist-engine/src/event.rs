//! Events the engine emits upward to its host.

use picklist_core::DropdownOption;
use serde::{Deserialize, Serialize};

/// A debounced request for externally filtered options (remote mode).
///
/// `generation` is a monotonically increasing stamp; responses are applied
/// back through the engine only while their generation is still current,
/// so a slow early response can never clobber a fast later one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    /// The query text as of the last keystroke before the quiet period.
    pub text: String,

    /// Stamp for discarding out-of-order responses.
    pub generation: u64,
}

/// Events emitted by the dropdown engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DropdownEvent {
    /// The user committed an option. The host owns `selectedIndex` and is
    /// expected to feed the new value back through a props change.
    OptionSelected { option: DropdownOption },

    /// Remote mode: the debounce quiet period elapsed; the host should
    /// fetch a new option list for this query.
    FilterRequested(FilterRequest),
}
