//! Conventional URI construction.
//!
//! Low-level building blocks for the URIs and literals that metadata builders
//! derive by convention:
//!
//! - [`LiteralFormatter`] turns a value into a URI literal
//! - [`KeySerializer`] assembles key expressions
//! - [`ConventionalUriBuilder`] appends segments to an absolute base URI
//! - [`ODataPath`] is an already-parsed request path that can be replayed

mod builder;
mod key;
mod literal;
mod path;

pub use builder::*;
pub use key::*;
pub use literal::*;
pub use path::*;
