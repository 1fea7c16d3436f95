//! Dropdown engine: ties selection, matching and querying together.
//!
//! One `DropdownEngine` per mounted control. The host drives it with
//! discrete events (prop changes, keystrokes, navigation, commits) and
//! renders from its getters; the engine reports upward over an event
//! channel handed out at construction.

use picklist_core::{DropdownOption, DropdownProps, FilterMode};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::event::DropdownEvent;
use crate::matcher::FuzzyScorer;
use crate::query::QueryController;
use crate::selection::SelectionState;

/// The selection/filtering engine behind one dropdown instance.
pub struct DropdownEngine {
    props: DropdownProps,
    mode: FilterMode,
    selection: SelectionState,
    query: QueryController,
    scorer: FuzzyScorer,
    tx: UnboundedSender<DropdownEvent>,
}

impl DropdownEngine {
    /// Mount the engine with the host's initial props.
    ///
    /// Returns the engine and the receiver for its upward events
    /// (`OptionSelected`, and `FilterRequested` in remote mode).
    pub fn new(props: DropdownProps) -> (Self, UnboundedReceiver<DropdownEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mode = props.filter_mode();
        let selection = SelectionState::new(props.selected_index);
        let query = QueryController::new(mode, tx.clone());

        let engine = Self {
            props,
            mode,
            selection,
            query,
            scorer: FuzzyScorer::new(),
            tx,
        };
        (engine, rx)
    }

    /// Replace the fuzzy scorer (threshold tuning).
    pub fn with_scorer(mut self, scorer: FuzzyScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Override the remote-mode debounce quiet period.
    pub fn with_debounce(mut self, debounce: std::time::Duration) -> Self {
        self.query.set_debounce(debounce);
        self
    }

    // =========================================================================
    // External Props
    // =========================================================================

    /// Apply a host-side prop change: `(previous state, new props) → new state`.
    ///
    /// This is the single entry point for out-of-band changes, callable
    /// from any UI-binding layer:
    /// - a changed `selected_index` moves the highlight (only on an actual
    ///   change of value, so repeated renders are no-ops)
    /// - a changed option list invalidates the query in local mode; in
    ///   remote mode the new list is the response to the current text, so
    ///   the text is kept and staleness is handled by generation stamps
    /// - the filter mode is immutable after mount; a flipped
    ///   `server_side_filtering` is ignored with a warning
    pub fn apply_props(&mut self, new_props: DropdownProps) {
        if new_props.filter_mode() != self.mode {
            tracing::warn!(
                "serverSideFiltering changed after mount; filter mode is fixed per instance"
            );
        }

        if new_props.options != self.props.options && !self.mode.is_remote() {
            tracing::debug!("option list changed, resetting query");
            self.query.reset();
        }

        self.selection.sync_external(new_props.selected_index);
        self.props = new_props;
    }

    // =========================================================================
    // User Input
    // =========================================================================

    /// The user edited the search text.
    ///
    /// Local mode takes effect immediately via `visible_options()`; remote
    /// mode (re)starts the debounce and eventually emits `FilterRequested`.
    pub fn query_changed(&mut self, text: impl Into<String>) {
        self.query.on_query_change(text);
    }

    /// The user moved keyboard/pointer focus to an option.
    pub fn option_activated(&mut self, option: &DropdownOption) {
        self.selection.set_active_item(option, &self.props.options);
    }

    /// The user committed an option.
    ///
    /// Reported upward only; `selected_index` stays with the host, which
    /// feeds the new value back through `apply_props`.
    pub fn option_committed(&self, option: &DropdownOption) {
        tracing::debug!(value = %option.value, "option committed");
        let _ = self.tx.send(DropdownEvent::OptionSelected {
            option: option.clone(),
        });
    }

    // =========================================================================
    // Remote Responses
    // =========================================================================

    /// Apply an asynchronous remote-filter response (remote mode).
    ///
    /// The response is accepted only if `generation` matches the stamp of
    /// the most recent filter request; a stale response is discarded so an
    /// early slow fetch cannot clobber a later fast one. Returns whether
    /// the response was applied.
    pub fn apply_filter_response(
        &mut self,
        generation: u64,
        options: Vec<DropdownOption>,
    ) -> bool {
        if !self.mode.is_remote() {
            tracing::warn!("filter response ignored in local mode");
            return false;
        }
        if generation != self.query.current_generation() {
            tracing::debug!(
                generation,
                current = self.query.current_generation(),
                "discarding stale filter response"
            );
            return false;
        }

        self.props.options = options;
        true
    }

    // =========================================================================
    // Render Inputs
    // =========================================================================

    /// The options currently visible in the open list.
    ///
    /// Local mode: the scorer's ranked subsequence for the current query.
    /// Remote mode: whatever list the host last supplied; the engine never
    /// filters it.
    pub fn visible_options(&self) -> Vec<DropdownOption> {
        if self.mode.is_remote() {
            return self.props.options.clone();
        }

        self.scorer
            .rank(self.query.text(), &self.props.options)
            .into_iter()
            .map(|idx| self.props.options[idx].clone())
            .collect()
    }

    /// Text the closed control renders: selected label or placeholder.
    pub fn rendered_value(&self) -> &str {
        self.selection
            .rendered_value(&self.props.options, &self.props.placeholder)
    }

    /// Check whether an option is the committed selection (by value).
    pub fn is_selected(&self, option: &DropdownOption) -> bool {
        self.selection.is_selected(option, &self.props.options)
    }

    /// Index of the highlighted option in the full option list.
    pub fn active_item_index(&self) -> Option<usize> {
        self.selection.active_item_index()
    }

    /// The committed selection index, `None` when out of range.
    pub fn selected_index(&self) -> Option<usize> {
        self.selection
            .selected_option(&self.props.options)
            .and(self.selection.selected_index())
    }

    /// The current query text.
    pub fn query_text(&self) -> &str {
        self.query.text()
    }

    /// The filtering mode, fixed at mount.
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// The current props as last applied.
    pub fn props(&self) -> &DropdownProps {
        &self.props
    }

    /// Unmount: cancel any pending debounce; a timer firing later is a no-op.
    pub fn teardown(&self) {
        self.query.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::FilterRequest;
    use std::time::Duration;
    use tokio::task::yield_now;
    use tokio::time::advance;

    fn abc_props() -> DropdownProps {
        DropdownProps {
            options: vec![
                DropdownOption::new("A", "a"),
                DropdownOption::new("B", "b"),
                DropdownOption::new("C", "c"),
            ],
            selected_index: Some(1),
            ..Default::default()
        }
    }

    fn labels(options: &[DropdownOption]) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn test_mount_seeds_highlight() {
        let (engine, _rx) = DropdownEngine::new(abc_props());
        assert_eq!(engine.active_item_index(), Some(1));
        assert_eq!(engine.rendered_value(), "B");
    }

    #[test]
    fn test_local_query_filters_and_clearing_restores() {
        let (mut engine, _rx) = DropdownEngine::new(abc_props());

        // No fuzzy match for "z": empty visible set
        engine.query_changed("z");
        assert!(engine.visible_options().is_empty());
        // Selection is unaffected by filtering
        assert_eq!(engine.rendered_value(), "B");

        // Clearing restores all three in original order
        engine.query_changed("");
        assert_eq!(labels(&engine.visible_options()), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_is_selected_by_value() {
        let (engine, _rx) = DropdownEngine::new(abc_props());

        assert!(engine.is_selected(&DropdownOption::new("B", "b")));
        // Same label, different value
        assert!(!engine.is_selected(&DropdownOption::new("B", "x")));
        assert!(!engine.is_selected(&DropdownOption::new("A", "a")));
    }

    #[test]
    fn test_option_committed_reports_without_mutating() {
        let (engine, mut rx) = DropdownEngine::new(abc_props());

        engine.option_committed(&DropdownOption::new("C", "c"));

        match rx.try_recv().unwrap() {
            DropdownEvent::OptionSelected { option } => assert_eq!(option.value, "c"),
            other => panic!("unexpected event: {:?}", other),
        }
        // Selection unchanged until the host feeds it back
        assert_eq!(engine.selected_index(), Some(1));
        assert_eq!(engine.rendered_value(), "B");
    }

    #[test]
    fn test_apply_props_follows_external_selection() {
        let (mut engine, _rx) = DropdownEngine::new(abc_props());

        let mut props = abc_props();
        props.selected_index = Some(2);
        engine.apply_props(props);

        assert_eq!(engine.active_item_index(), Some(2));
        assert_eq!(engine.rendered_value(), "C");
    }

    #[test]
    fn test_apply_props_same_selection_keeps_navigation() {
        let (mut engine, _rx) = DropdownEngine::new(abc_props());

        engine.option_activated(&DropdownOption::new("A", "a"));
        assert_eq!(engine.active_item_index(), Some(0));

        // Re-render with an unchanged external value
        engine.apply_props(abc_props());
        assert_eq!(engine.active_item_index(), Some(0));
    }

    #[test]
    fn test_changed_options_reset_local_query() {
        let (mut engine, _rx) = DropdownEngine::new(abc_props());

        engine.query_changed("b");
        assert_eq!(engine.query_text(), "b");

        let mut props = abc_props();
        props.options.push(DropdownOption::new("D", "d"));
        engine.apply_props(props);

        assert_eq!(engine.query_text(), "");
        assert_eq!(labels(&engine.visible_options()), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_out_of_range_selection_is_unselected() {
        let mut props = abc_props();
        props.selected_index = Some(42);
        let (engine, _rx) = DropdownEngine::new(props);

        assert_eq!(engine.selected_index(), None);
        assert_eq!(engine.rendered_value(), "-- Select --");
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_mode_debounces_and_stays_unselected() {
        let props = DropdownProps {
            server_side_filtering: true,
            ..Default::default()
        };
        let (mut engine, mut rx) = DropdownEngine::new(props);

        engine.query_changed("foo");
        yield_now().await;

        // No local filtering happens in remote mode
        assert!(engine.visible_options().is_empty());

        advance(Duration::from_millis(800)).await;
        let request = match rx.recv().await.unwrap() {
            DropdownEvent::FilterRequested(request) => request,
            other => panic!("unexpected event: {:?}", other),
        };
        assert_eq!(request.text, "foo");

        // Unselected until the host supplies options and a selection
        assert_eq!(engine.selected_index(), None);
        assert_eq!(engine.rendered_value(), "-- Select --");

        assert!(engine.apply_filter_response(
            request.generation,
            vec![DropdownOption::new("Foo", "foo")],
        ));
        assert_eq!(labels(&engine.visible_options()), vec!["Foo"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_filter_response_discarded() {
        let props = DropdownProps {
            server_side_filtering: true,
            ..Default::default()
        };
        let (mut engine, mut rx) = DropdownEngine::new(props);

        engine.query_changed("a");
        yield_now().await;
        advance(Duration::from_millis(900)).await;
        let first = match rx.recv().await.unwrap() {
            DropdownEvent::FilterRequested(FilterRequest { generation, .. }) => generation,
            other => panic!("unexpected event: {:?}", other),
        };

        engine.query_changed("ab");
        yield_now().await;
        advance(Duration::from_millis(900)).await;
        let second = match rx.recv().await.unwrap() {
            DropdownEvent::FilterRequested(FilterRequest { generation, .. }) => generation,
            other => panic!("unexpected event: {:?}", other),
        };

        // The slow early response arrives after the fast later one
        assert!(engine.apply_filter_response(second, vec![DropdownOption::new("AB", "ab")]));
        assert!(!engine.apply_filter_response(first, vec![DropdownOption::new("A", "a")]));

        assert_eq!(labels(&engine.visible_options()), vec!["AB"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_query_survives_option_replacement() {
        let props = DropdownProps {
            server_side_filtering: true,
            ..Default::default()
        };
        let (mut engine, mut rx) = DropdownEngine::new(props);

        engine.query_changed("foo");
        yield_now().await;
        advance(Duration::from_millis(900)).await;
        let _ = rx.recv().await.unwrap();

        let mut props = DropdownProps {
            server_side_filtering: true,
            ..Default::default()
        };
        props.options = vec![DropdownOption::new("Foo", "foo")];
        engine.apply_props(props);

        // The new list is the response to the current text, so it is kept
        assert_eq!(engine.query_text(), "foo");
    }
}
