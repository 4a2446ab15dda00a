//! Convention configuration

/// How key values are placed in entity instance URIs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyConvention {
    /// `Customers(5)`, `Orders(CustomerId=1,Id=2)`.
    #[default]
    Parentheses,
    /// `Customers/5` for single-part keys; multi-part keys fall back to parentheses.
    Segment,
}

/// Configuration for URI conventions, fixed once per service.
///
/// # Example
///
/// ```
/// use odata_lib::config::{ConventionConfig, KeyConvention};
///
/// let config = ConventionConfig::default().with_keys_as_segments();
/// assert_eq!(config.key_convention, KeyConvention::Segment);
/// ```
#[derive(Debug, Clone)]
pub struct ConventionConfig {
    /// Key placement convention.
    ///
    /// Default: parentheses
    pub key_convention: KeyConvention,

    /// Percent-encode quoted and prefixed literals in keys and ETags.
    ///
    /// Default: true
    pub encode_literals: bool,
}

impl Default for ConventionConfig {
    fn default() -> Self {
        Self {
            key_convention: KeyConvention::Parentheses,
            encode_literals: true,
        }
    }
}

impl ConventionConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key convention.
    pub fn with_key_convention(mut self, convention: KeyConvention) -> Self {
        self.key_convention = convention;
        self
    }

    /// Switches to the keys-as-segments convention.
    pub fn with_keys_as_segments(self) -> Self {
        self.with_key_convention(KeyConvention::Segment)
    }

    /// Disables percent-encoding of literals.
    pub fn without_literal_encoding(mut self) -> Self {
        self.encode_literals = false;
        self
    }
}
