//! Error types

mod literal;
mod metadata;

pub use literal::*;
pub use metadata::*;

/// Result alias used throughout metadata computation.
pub type Result<T, E = MetadataError> = std::result::Result<T, E>;
