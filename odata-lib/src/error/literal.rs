//! Literal formatting errors

/// Errors raised while turning a value into a URI literal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiteralError {
    /// The value has no defined literal encoding (null, complex, collection, stream).
    #[error("Value of type '{type_name}' cannot be formatted as a URI literal")]
    UnsupportedLiteralType { type_name: &'static str },
}

impl LiteralError {
    /// Creates a new unsupported literal type error.
    pub fn unsupported(type_name: &'static str) -> Self {
        Self::UnsupportedLiteralType { type_name }
    }
}
