//! URI literal formatting.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::SecondsFormat;
use chrono::TimeDelta;

use crate::error::LiteralError;
use crate::model::ODataValue;

/// Formats values as URI literals.
///
/// `Default` literals are used for parenthetical keys, ETags and URI
/// constants: strings and enums are quoted, binary, spatial and duration
/// values carry a type prefix, everything else is bare. `Segment` literals are
/// used only for single-part keys written as a path segment and are never
/// quoted or prefixed.
///
/// # Example
///
/// ```
/// use odata_lib::model::ODataValue;
/// use odata_lib::uri::LiteralFormatter;
///
/// let formatter = LiteralFormatter::FOR_CONSTANTS_WITHOUT_ENCODING;
/// assert_eq!(formatter.format(&ODataValue::Double(5.0)).unwrap(), "5.0");
/// assert_eq!(formatter.format(&"O'Brien".into()).unwrap(), "'O''Brien'");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralFormatter {
    /// Quoted/prefixed literals, optionally percent-encoded.
    Default {
        /// Whether the result is percent-encoded.
        encode: bool,
    },
    /// Bare literals for keys-as-segments, always percent-encoded.
    Segment,
}

impl LiteralFormatter {
    /// Default literals, percent-encoded.
    pub const FOR_CONSTANTS: Self = Self::Default { encode: true };

    /// Default literals, left unencoded.
    pub const FOR_CONSTANTS_WITHOUT_ENCODING: Self = Self::Default { encode: false };

    /// Segment literals.
    pub const FOR_KEYS_AS_SEGMENTS: Self = Self::Segment;

    /// Formats a value as a literal.
    ///
    /// Null, complex, collection and stream values have no literal form.
    pub fn format(&self, value: &ODataValue) -> Result<String, LiteralError> {
        match self {
            Self::Default { encode } => {
                let literal = format_prefixed(value)?;
                if *encode {
                    Ok(urlencoding::encode(&literal).into_owned())
                } else {
                    Ok(literal)
                }
            }
            Self::Segment => {
                let raw = match value {
                    ODataValue::Enum(e) => e.value.clone(),
                    ODataValue::String(s) => escape_leading_dollar_sign(s),
                    other => format_raw(other)?,
                };
                Ok(urlencoding::encode(&raw).into_owned())
            }
        }
    }
}

/// Escapes a string as a quoted literal, doubling embedded single quotes.
pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Prepends one `$` to a value starting with `$`, so it cannot be mistaken
/// for a system query option or path keyword.
///
/// Only one `$` is ever added, whatever the value starts with.
fn escape_leading_dollar_sign(s: &str) -> String {
    if s.starts_with('$') {
        format!("${}", s)
    } else {
        s.to_string()
    }
}

fn format_prefixed(value: &ODataValue) -> Result<String, LiteralError> {
    let literal = match value {
        ODataValue::String(s) => escape_string(s),
        ODataValue::Enum(e) => format!("{}{}", e.type_name, escape_string(&e.value)),
        ODataValue::Binary(_) => format!("binary'{}'", format_raw(value)?),
        ODataValue::Geography(_) => format!("geography'{}'", format_raw(value)?),
        ODataValue::Geometry(_) => format!("geometry'{}'", format_raw(value)?),
        ODataValue::Duration(_) => format!("duration'{}'", format_raw(value)?),
        other => format_raw(other)?,
    };
    Ok(literal)
}

/// Formats the canonical textual form of a value, without quotes or prefix.
fn format_raw(value: &ODataValue) -> Result<String, LiteralError> {
    let raw = match value {
        ODataValue::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
        ODataValue::Byte(n) => n.to_string(),
        ODataValue::SByte(n) => n.to_string(),
        ODataValue::Int16(n) => n.to_string(),
        ODataValue::Int32(n) => n.to_string(),
        ODataValue::Int64(n) => n.to_string(),
        ODataValue::UInt16(n) => n.to_string(),
        ODataValue::UInt32(n) => n.to_string(),
        ODataValue::UInt64(n) => n.to_string(),
        ODataValue::Single(n) => format_float(f64::from(*n), n.to_string()),
        ODataValue::Double(n) => append_decimal_marker(format_float(*n, n.to_string())),
        ODataValue::Decimal(d) => d.to_string(),
        ODataValue::String(s) => s.clone(),
        ODataValue::Guid(g) => g.to_string(),
        ODataValue::Binary(bytes) => BASE64.encode(bytes),
        ODataValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        ODataValue::DateTimeOffset(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ODataValue::TimeOfDay(t) => t.format("%H:%M:%S%.f").to_string(),
        ODataValue::Duration(d) => format_duration(d),
        ODataValue::Geography(s) | ODataValue::Geometry(s) => s.to_well_known_text(),
        ODataValue::Enum(e) => e.value.clone(),
        ODataValue::Null
        | ODataValue::Complex(_)
        | ODataValue::Collection(_)
        | ODataValue::Stream(_) => return Err(LiteralError::unsupported(value.type_name())),
    };
    Ok(raw)
}

/// Maps non-finite floats to their literal keywords.
fn format_float(n: f64, display: String) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "INF".to_string()
    } else if n == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        display
    }
}

/// Appends `.0` to a whole-number double so it reads back as a double.
fn append_decimal_marker(formatted: String) -> String {
    let digits = formatted.strip_prefix('-').unwrap_or(&formatted);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}.0", formatted)
    } else {
        formatted
    }
}

/// Formats a duration as `[-]P[nD][T[nH][nM][n[.f]S]]`.
fn format_duration(duration: &TimeDelta) -> String {
    let negative = *duration < TimeDelta::zero();
    let abs = duration.abs();
    let total_seconds = abs.num_seconds();
    let nanos = abs.subsec_nanos();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('P');
    if days > 0 {
        out.push_str(&format!("{}D", days));
    }

    let has_time = hours > 0 || minutes > 0 || seconds > 0 || nanos > 0;
    if has_time || days == 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{}H", hours));
        }
        if minutes > 0 {
            out.push_str(&format!("{}M", minutes));
        }
        if seconds > 0 || nanos > 0 || (hours == 0 && minutes == 0) {
            out.push_str(&seconds.to_string());
            if nanos > 0 {
                let fraction = format!("{:09}", nanos);
                out.push('.');
                out.push_str(fraction.trim_end_matches('0'));
            }
            out.push('S');
        }
    }
    out
}
