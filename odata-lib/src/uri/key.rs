//! Key expression serialization.

use super::LiteralFormatter;
use crate::config::ConventionConfig;
use crate::config::KeyConvention;
use crate::error::LiteralError;
use crate::model::ODataValue;

/// Appends key expressions to a URI under one of the two key conventions.
///
/// Selected once per service from [`ConventionConfig`]. Callers validate that
/// every key value is non-null before serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySerializer {
    convention: KeyConvention,
    formatter: LiteralFormatter,
}

impl KeySerializer {
    /// Parenthetical keys with percent-encoded literals.
    pub const PARENTHESES: Self = Self {
        convention: KeyConvention::Parentheses,
        formatter: LiteralFormatter::FOR_CONSTANTS,
    };

    /// Keys-as-segments with percent-encoded parenthetical fallback.
    pub const SEGMENT: Self = Self {
        convention: KeyConvention::Segment,
        formatter: LiteralFormatter::FOR_CONSTANTS,
    };

    /// Creates the serializer selected by the configuration.
    pub fn from_config(config: &ConventionConfig) -> Self {
        Self {
            convention: config.key_convention,
            formatter: LiteralFormatter::Default {
                encode: config.encode_literals,
            },
        }
    }

    /// Returns the key convention in use.
    pub fn convention(&self) -> KeyConvention {
        self.convention
    }

    /// Appends the key expression for `properties` to `buffer`.
    ///
    /// Parenthetical keys emit `(v)` for a single property and
    /// `(k1=v1,k2=v2)` otherwise. Segment keys emit `/v`, but only for a
    /// single property: multi-part keys always fall back to parentheses.
    pub fn append_key_expression<T>(
        &self,
        buffer: &mut String,
        properties: &[T],
        name_of: impl Fn(&T) -> &str,
        value_of: impl Fn(&T) -> &ODataValue,
    ) -> Result<(), LiteralError> {
        match (self.convention, properties) {
            (KeyConvention::Segment, [single]) => {
                buffer.push('/');
                buffer.push_str(&LiteralFormatter::FOR_KEYS_AS_SEGMENTS.format(value_of(single))?);
                Ok(())
            }
            _ => self.append_parentheses(buffer, properties, name_of, value_of),
        }
    }

    fn append_parentheses<T>(
        &self,
        buffer: &mut String,
        properties: &[T],
        name_of: impl Fn(&T) -> &str,
        value_of: impl Fn(&T) -> &ODataValue,
    ) -> Result<(), LiteralError> {
        let named = properties.len() > 1;
        buffer.push('(');
        for (i, property) in properties.iter().enumerate() {
            if i > 0 {
                buffer.push(',');
            }
            if named {
                buffer.push_str(name_of(property));
                buffer.push('=');
            }
            buffer.push_str(&self.formatter.format(value_of(property))?);
        }
        buffer.push(')');
        Ok(())
    }
}

impl Default for KeySerializer {
    fn default() -> Self {
        Self::PARENTHESES
    }
}
