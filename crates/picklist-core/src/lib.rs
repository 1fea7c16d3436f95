//! Core types for the picklist dropdown engine.
//!
//! This crate contains shared data structures that are used across all
//! picklist crates:
//! - Dropdown option type
//! - Filter mode selection
//! - Widget props supplied by the host application
//! - Error types

mod error;
mod mode;
mod option;
mod props;

pub use error::{PropsError, SourceError};
pub use mode::FilterMode;
pub use option::DropdownOption;
pub use props::{DropdownProps, DEFAULT_PLACEHOLDER};
