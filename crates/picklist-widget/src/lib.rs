//! Framework-independent widget contract for the picklist dropdown.
//!
//! This crate is the boundary a view layer binds to:
//! - `Dropdown` routes raw input events into the engine and snapshots
//!   `RenderState` back out
//! - `FilterSource` is the async seam for server-side filtering
//! - `RemoteFilterDriver` resolves debounced filter requests against a
//!   source and applies responses back to the control
//!
//! No toolkit code lives here; rendering, theming and layout are the
//! embedding application's concern.

mod adapter;
mod driver;
mod source;

pub use adapter::{Dropdown, InputEvent, RenderState, NO_RESULTS_TEXT};
pub use driver::RemoteFilterDriver;
pub use source::FilterSource;
