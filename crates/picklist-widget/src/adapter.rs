//! View-adapter contract: input events in, render snapshot out.
//!
//! The view layer (out of scope here) forwards raw input as `InputEvent`s
//! and renders from `RenderState` snapshots. These types are deliberately
//! toolkit-independent to enable testing and clear separation; nothing in
//! this crate draws anything.

use picklist_core::{DropdownOption, DropdownProps, FilterMode};
use picklist_engine::{DropdownEngine, DropdownEvent};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;

/// Sentinel the view renders when the visible option set is empty.
pub const NO_RESULTS_TEXT: &str = "No Results Found";

/// Raw input forwarded by the view layer.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// The search text changed.
    QueryChanged(String),
    /// Keyboard/pointer focus moved to an option.
    OptionActivated(DropdownOption),
    /// The user committed an option.
    OptionCommitted(DropdownOption),
    /// The host changed props out-of-band (property pane, page store).
    PropsChanged(DropdownProps),
}

/// Everything the view needs to draw one frame of the control.
#[derive(Debug, Clone, Serialize)]
pub struct RenderState {
    /// Options to show in the open list, in display order.
    pub visible_options: Vec<DropdownOption>,

    /// Highlighted option, as an index into the full option list.
    pub active_item_index: Option<usize>,

    /// Committed selection, validated against the current list.
    pub selected_index: Option<usize>,

    /// Label of the selected option, or the placeholder.
    pub rendered_value: String,

    /// Current search text.
    pub query: String,

    /// Whether to render the no-results sentinel instead of a list.
    pub no_results: bool,

    /// Whether the search input is shown at all.
    pub show_filter_input: bool,

    /// Pass-through render flags from the host.
    pub disabled: bool,
    pub is_loading: bool,
    pub is_valid: bool,
}

/// One mounted dropdown control.
///
/// Thin wrapper that routes `InputEvent`s into the engine and snapshots
/// `RenderState` back out. The host listens on the returned event channel
/// for commits and filter requests.
pub struct Dropdown {
    engine: DropdownEngine,
}

impl Dropdown {
    /// Mount the control with the host's initial props.
    pub fn mount(props: DropdownProps) -> (Self, UnboundedReceiver<DropdownEvent>) {
        let (engine, rx) = DropdownEngine::new(props);
        (Self { engine }, rx)
    }

    /// Route one raw input event into the engine.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::QueryChanged(text) => self.engine.query_changed(text),
            InputEvent::OptionActivated(option) => self.engine.option_activated(&option),
            InputEvent::OptionCommitted(option) => self.engine.option_committed(&option),
            InputEvent::PropsChanged(props) => self.engine.apply_props(props),
        }
    }

    /// Apply an asynchronous remote-filter response. Stale generations are
    /// discarded; returns whether the response was applied.
    pub fn apply_filter_response(
        &mut self,
        generation: u64,
        options: Vec<DropdownOption>,
    ) -> bool {
        self.engine.apply_filter_response(generation, options)
    }

    /// Snapshot the state the view renders from.
    pub fn render_state(&self) -> RenderState {
        let props = self.engine.props();
        let visible_options = self.engine.visible_options();

        RenderState {
            no_results: visible_options.is_empty(),
            visible_options,
            active_item_index: self.engine.active_item_index(),
            selected_index: self.engine.selected_index(),
            rendered_value: self.engine.rendered_value().to_string(),
            query: self.engine.query_text().to_string(),
            show_filter_input: props.is_filterable,
            disabled: props.disabled,
            is_loading: props.is_loading,
            is_valid: props.is_valid,
        }
    }

    /// Check whether an option is the committed selection (by value).
    pub fn is_selected(&self, option: &DropdownOption) -> bool {
        self.engine.is_selected(option)
    }

    /// The filtering mode, fixed at mount.
    pub fn mode(&self) -> FilterMode {
        self.engine.mode()
    }

    /// Unmount the control. Pending debounce timers become no-ops.
    pub fn unmount(&self) {
        self.engine.teardown();
    }
}
