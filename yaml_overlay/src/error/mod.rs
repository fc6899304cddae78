//! Error types produced while loading, merging and emitting documents.

mod constructors;
mod types;

pub use types::{Location, PatchError};

/// Result alias used throughout the crate.
pub type PatchResult<T> = Result<T, PatchError>;
