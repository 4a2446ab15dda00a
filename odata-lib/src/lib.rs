//! OData metadata conventions
//!
//! Derives the metadata a resource payload may omit (canonical id, edit and
//! read links, ETag, media resource, stream and navigation links, bindable
//! operation targets) from the service model and the OData URL conventions.
//!
//! - [`uri`] formats literals and builds URIs
//! - [`model`] holds resource values and the service model
//! - [`metadata`] answers metadata questions for one resource at a time

pub mod config;
pub mod error;
pub mod metadata;
pub mod model;
pub mod uri;

pub use config::ConventionConfig;
pub use error::MetadataError;
pub use metadata::MetadataBuilder;
pub use metadata::ResourceMetadataBuilder;
