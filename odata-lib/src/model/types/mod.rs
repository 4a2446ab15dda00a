//! Special value types

mod enum_value;
mod spatial;
mod stream;

pub use enum_value::*;
pub use spatial::*;
pub use stream::*;
