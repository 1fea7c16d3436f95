//! Selection state: committed selection vs highlighted option.
//!
//! Two indices with different owners:
//! - `selected_index` is the committed choice. The host owns the
//!   authoritative value; the engine mirrors it and treats out-of-range
//!   values as "unselected", never as an error.
//! - `active_item_index` is the option highlighted by keyboard/pointer
//!   navigation. The engine owns it outright.

use picklist_core::DropdownOption;

/// Tracks the committed selection and the highlighted option.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Mirror of the host-owned committed selection.
    selected_index: Option<usize>,

    /// Index into the full option list of the highlighted option.
    active_item_index: Option<usize>,
}

impl SelectionState {
    /// Create selection state at mount, seeding the highlight from the
    /// host-supplied selection.
    pub fn new(selected_index: Option<usize>) -> Self {
        Self {
            selected_index,
            active_item_index: selected_index,
        }
    }

    /// Record an external selection change.
    ///
    /// Only an actual change of value moves the highlight; repeated calls
    /// with the same index are no-ops, so re-renders never clobber
    /// keyboard focus. Returns whether the highlight moved.
    pub fn sync_external(&mut self, new_selected_index: Option<usize>) -> bool {
        if new_selected_index == self.selected_index {
            return false;
        }

        tracing::debug!(
            from = ?self.selected_index,
            to = ?new_selected_index,
            "external selection changed, moving highlight"
        );
        self.selected_index = new_selected_index;
        self.active_item_index = new_selected_index;
        true
    }

    /// Move the highlight to the given option.
    ///
    /// The position is resolved by **label** against the full (unfiltered)
    /// option list, first match wins. Two options sharing a label are not
    /// distinguished by this lookup, so navigation may land on the wrong
    /// entry for duplicate labels — a known limitation carried over from
    /// the original control. A label with no match clears the highlight.
    pub fn set_active_item(&mut self, option: &DropdownOption, options: &[DropdownOption]) {
        self.active_item_index = options.iter().position(|o| o.label == option.label);
    }

    /// Index of the highlighted option in the full option list, if any.
    pub fn active_item_index(&self) -> Option<usize> {
        self.active_item_index
    }

    /// The raw mirrored selection, unvalidated.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// The committed option, if the mirrored index is in range.
    pub fn selected_option<'a>(&self, options: &'a [DropdownOption]) -> Option<&'a DropdownOption> {
        self.selected_index.and_then(|i| options.get(i))
    }

    /// Check whether the given option is the committed selection.
    ///
    /// Equality is by `value`, never by label and never by position. Two
    /// options with the same label but different values compare unequal.
    pub fn is_selected(&self, option: &DropdownOption, options: &[DropdownOption]) -> bool {
        self.selected_option(options)
            .is_some_and(|selected| selected.value == option.value)
    }

    /// Text the closed control renders: the selected label, or the
    /// placeholder when nothing (valid) is selected.
    pub fn rendered_value<'a>(
        &self,
        options: &'a [DropdownOption],
        placeholder: &'a str,
    ) -> &'a str {
        self.selected_option(options)
            .map(|o| o.label.as_str())
            .unwrap_or(placeholder)
    }

    /// The highlighted option, if the index is in range.
    pub fn active_item<'a>(&self, options: &'a [DropdownOption]) -> Option<&'a DropdownOption> {
        self.active_item_index.and_then(|i| options.get(i))
    }
}
