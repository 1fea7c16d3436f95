//! Remote filter source seam.
//!
//! In remote mode the engine never performs IO itself; it emits debounced
//! filter requests and the host supplies a new option list asynchronously.
//! `FilterSource` is that seam: it returns futures, allowing the caller to
//! spawn them however it wants, and is mockable for testing.

use futures::future::BoxFuture;
use picklist_core::{DropdownOption, SourceError};

/// An external provider of filtered option lists.
#[cfg_attr(test, mockall::automock)]
pub trait FilterSource: Send + Sync {
    /// Fetch the option list for the given query text.
    fn fetch(&self, text: String) -> BoxFuture<'static, Result<Vec<DropdownOption>, SourceError>>;
}

// =============================================================================
// Mock Source for Testing
// =============================================================================
