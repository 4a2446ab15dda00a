//! Enum member values

use serde::Deserialize;
use serde::Serialize;

/// A member of an enum type, carried by name.
///
/// # Example
///
/// ```
/// use odata_lib::model::types::EnumValue;
///
/// let color = EnumValue::new("Sales.Color", "Red");
/// assert_eq!(color.type_name, "Sales.Color");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    /// Fully qualified name of the enum type (e.g., "Sales.Color").
    pub type_name: String,
    /// The member name, or a comma-separated list for flag enums.
    pub value: String,
}

impl EnumValue {
    /// Creates a new enum value.
    pub fn new(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            value: value.into(),
        }
    }
}
