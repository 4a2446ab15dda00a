//! EDM model types
//!
//! A read-only description of the service's entity types, navigation
//! sources and bindable operations. Conventions only ever consult the model;
//! they never change it.

mod edm;
mod entity;
mod operation;
mod source;

pub use edm::*;
pub use entity::*;
pub use operation::*;
pub use source::*;
