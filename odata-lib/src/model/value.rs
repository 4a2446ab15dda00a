//! Value enum for dynamic property values

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::TimeDelta;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::Resource;
use super::types::EnumValue;
use super::types::SpatialValue;
use super::types::StreamReference;

/// A dynamic value that can hold any OData property value.
///
/// # Type Mapping
///
/// | EDM Type | Rust Variant |
/// |----------|--------------|
/// | null | `Null` |
/// | Edm.Boolean | `Boolean` |
/// | Edm.Byte / Edm.SByte | `Byte` / `SByte` |
/// | Edm.Int16 / Int32 / Int64 | `Int16` / `Int32` / `Int64` |
/// | UInt16 / UInt32 / UInt64 type definitions | `UInt16` / `UInt32` / `UInt64` |
/// | Edm.Single / Edm.Double | `Single` / `Double` |
/// | Edm.Decimal | `Decimal` |
/// | Edm.String | `String` |
/// | Edm.Guid | `Guid` |
/// | Edm.Binary | `Binary` |
/// | Edm.Date | `Date` |
/// | Edm.DateTimeOffset | `DateTimeOffset` |
/// | Edm.TimeOfDay | `TimeOfDay` |
/// | Edm.Duration | `Duration` |
/// | Edm.Geography* / Edm.Geometry* | `Geography` / `Geometry` |
/// | Enum types | `Enum` |
/// | Complex types | `Complex` |
/// | Collections | `Collection` |
/// | Edm.Stream | `Stream` |
///
/// # Example
///
/// ```
/// use odata_lib::model::ODataValue;
///
/// let name = ODataValue::from("Contoso");
/// let id = ODataValue::from(5i32);
/// let empty = ODataValue::Null;
/// assert!(empty.is_null());
/// assert_eq!(id.type_name(), "Edm.Int32");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ODataValue {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Unsigned 8-bit integer.
    Byte(u8),
    /// Signed 8-bit integer.
    SByte(i8),
    /// 16-bit integer.
    Int16(i16),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
    /// Unsigned 16-bit integer (type definition over Int32).
    UInt16(u16),
    /// Unsigned 32-bit integer (type definition over Int64).
    UInt32(u32),
    /// Unsigned 64-bit integer (type definition over Decimal).
    UInt64(u64),
    /// 32-bit floating point.
    Single(f32),
    /// 64-bit floating point.
    Double(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// GUID value.
    Guid(Uuid),
    /// Binary value.
    Binary(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time with offset.
    DateTimeOffset(DateTime<FixedOffset>),
    /// Time of day.
    TimeOfDay(NaiveTime),
    /// Signed duration.
    Duration(TimeDelta),
    /// Geography value.
    Geography(SpatialValue),
    /// Geometry value.
    Geometry(SpatialValue),
    /// Enum member.
    Enum(EnumValue),
    /// Complex (structured) value.
    Complex(Box<Resource>),
    /// Collection value.
    Collection(Vec<ODataValue>),
    /// Stream reference.
    Stream(StreamReference),
}

impl ODataValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, ODataValue::Null)
    }

    /// Returns `true` for structured, collection and stream values.
    ///
    /// Such values can never take part in a key or an ETag.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            ODataValue::Complex(_) | ODataValue::Collection(_) | ODataValue::Stream(_)
        )
    }

    /// Returns the EDM type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            ODataValue::Null => "null",
            ODataValue::Boolean(_) => "Edm.Boolean",
            ODataValue::Byte(_) => "Edm.Byte",
            ODataValue::SByte(_) => "Edm.SByte",
            ODataValue::Int16(_) => "Edm.Int16",
            ODataValue::Int32(_) => "Edm.Int32",
            ODataValue::Int64(_) => "Edm.Int64",
            ODataValue::UInt16(_) => "UInt16",
            ODataValue::UInt32(_) => "UInt32",
            ODataValue::UInt64(_) => "UInt64",
            ODataValue::Single(_) => "Edm.Single",
            ODataValue::Double(_) => "Edm.Double",
            ODataValue::Decimal(_) => "Edm.Decimal",
            ODataValue::String(_) => "Edm.String",
            ODataValue::Guid(_) => "Edm.Guid",
            ODataValue::Binary(_) => "Edm.Binary",
            ODataValue::Date(_) => "Edm.Date",
            ODataValue::DateTimeOffset(_) => "Edm.DateTimeOffset",
            ODataValue::TimeOfDay(_) => "Edm.TimeOfDay",
            ODataValue::Duration(_) => "Edm.Duration",
            ODataValue::Geography(_) => "Edm.Geography",
            ODataValue::Geometry(_) => "Edm.Geometry",
            ODataValue::Enum(_) => "enum",
            ODataValue::Complex(_) => "complex",
            ODataValue::Collection(_) => "collection",
            ODataValue::Stream(_) => "Edm.Stream",
        }
    }

    /// Converts unsigned values to the signed type they are defined over.
    ///
    /// `UInt16` becomes `Int32`, `UInt32` becomes `Int64` and `UInt64`
    /// becomes `Decimal`. Every other value is returned unchanged.
    pub fn to_underlying_signed(&self) -> ODataValue {
        match self {
            ODataValue::UInt16(v) => ODataValue::Int32(i32::from(*v)),
            ODataValue::UInt32(v) => ODataValue::Int64(i64::from(*v)),
            ODataValue::UInt64(v) => ODataValue::Decimal(Decimal::from(*v)),
            other => other.clone(),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for ODataValue {
    fn from(v: bool) -> Self {
        ODataValue::Boolean(v)
    }
}

impl From<u8> for ODataValue {
    fn from(v: u8) -> Self {
        ODataValue::Byte(v)
    }
}

impl From<i8> for ODataValue {
    fn from(v: i8) -> Self {
        ODataValue::SByte(v)
    }
}

impl From<i16> for ODataValue {
    fn from(v: i16) -> Self {
        ODataValue::Int16(v)
    }
}

impl From<i32> for ODataValue {
    fn from(v: i32) -> Self {
        ODataValue::Int32(v)
    }
}

impl From<i64> for ODataValue {
    fn from(v: i64) -> Self {
        ODataValue::Int64(v)
    }
}

impl From<u16> for ODataValue {
    fn from(v: u16) -> Self {
        ODataValue::UInt16(v)
    }
}

impl From<u32> for ODataValue {
    fn from(v: u32) -> Self {
        ODataValue::UInt32(v)
    }
}

impl From<u64> for ODataValue {
    fn from(v: u64) -> Self {
        ODataValue::UInt64(v)
    }
}

impl From<f32> for ODataValue {
    fn from(v: f32) -> Self {
        ODataValue::Single(v)
    }
}

impl From<f64> for ODataValue {
    fn from(v: f64) -> Self {
        ODataValue::Double(v)
    }
}

impl From<Decimal> for ODataValue {
    fn from(v: Decimal) -> Self {
        ODataValue::Decimal(v)
    }
}

impl From<String> for ODataValue {
    fn from(v: String) -> Self {
        ODataValue::String(v)
    }
}

impl From<&str> for ODataValue {
    fn from(v: &str) -> Self {
        ODataValue::String(v.to_string())
    }
}

impl From<Uuid> for ODataValue {
    fn from(v: Uuid) -> Self {
        ODataValue::Guid(v)
    }
}

impl From<Vec<u8>> for ODataValue {
    fn from(v: Vec<u8>) -> Self {
        ODataValue::Binary(v)
    }
}

impl From<NaiveDate> for ODataValue {
    fn from(v: NaiveDate) -> Self {
        ODataValue::Date(v)
    }
}

impl From<DateTime<FixedOffset>> for ODataValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        ODataValue::DateTimeOffset(v)
    }
}

impl From<NaiveTime> for ODataValue {
    fn from(v: NaiveTime) -> Self {
        ODataValue::TimeOfDay(v)
    }
}

impl From<TimeDelta> for ODataValue {
    fn from(v: TimeDelta) -> Self {
        ODataValue::Duration(v)
    }
}

impl From<EnumValue> for ODataValue {
    fn from(v: EnumValue) -> Self {
        ODataValue::Enum(v)
    }
}

impl From<Resource> for ODataValue {
    fn from(v: Resource) -> Self {
        ODataValue::Complex(Box::new(v))
    }
}

impl From<StreamReference> for ODataValue {
    fn from(v: StreamReference) -> Self {
        ODataValue::Stream(v)
    }
}

impl<T: Into<ODataValue>> From<Option<T>> for ODataValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => ODataValue::Null,
        }
    }
}
