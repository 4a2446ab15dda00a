//! Typed models

pub mod metadata;
mod resource;
pub mod types;
mod value;

pub use resource::*;
pub use value::*;
