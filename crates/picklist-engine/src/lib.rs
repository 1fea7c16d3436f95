//! Selection and filtering engine for the picklist dropdown.
//!
//! The engine is the single source of truth a view layer renders from:
//! - `SelectionState` tracks the committed selection (externally owned,
//!   mirrored here) and the highlighted option (engine owned)
//! - `FuzzyScorer` ranks options against a query in local mode
//! - `QueryController` debounces keystrokes into filter requests in
//!   remote mode
//! - `DropdownEngine` ties them together and emits events upward
//!
//! ## Event Flow
//!
//! ```text
//! host props ──► apply_props ──► SelectionState
//! keystrokes ──► query_changed ─┬─► FuzzyScorer (local, synchronous)
//!                               └─► QueryController ──debounce──►
//!                                       DropdownEvent::FilterRequested
//! commit ──► option_committed ──► DropdownEvent::OptionSelected
//! ```
//!
//! All state transitions are driven by discrete events on the caller's
//! thread; the only suspension is the remote-mode debounce timer.

mod engine;
mod event;
mod matcher;
mod query;
mod selection;

pub use engine::DropdownEngine;
pub use event::{DropdownEvent, FilterRequest};
pub use matcher::FuzzyScorer;
pub use query::QueryController;
pub use selection::SelectionState;
