//! Spatial values

use serde::Deserialize;
use serde::Serialize;

/// A geography or geometry value held in well-known-text form.
///
/// Spatial values are opaque here: they are only ever written out, never
/// interpreted, so the WKT body is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialValue {
    /// Coordinate system identifier, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srid: Option<u32>,
    /// Well-known-text body (e.g., "POINT(1 2)").
    pub wkt: String,
}

impl SpatialValue {
    /// Creates a spatial value without a coordinate system.
    pub fn new(wkt: impl Into<String>) -> Self {
        Self {
            srid: None,
            wkt: wkt.into(),
        }
    }

    /// Creates a spatial value with a coordinate system identifier.
    pub fn with_srid(srid: u32, wkt: impl Into<String>) -> Self {
        Self {
            srid: Some(srid),
            wkt: wkt.into(),
        }
    }

    /// Returns the extended well-known-text form (`SRID=n;WKT`).
    pub fn to_well_known_text(&self) -> String {
        match self.srid {
            Some(srid) => format!("SRID={};{}", srid, self.wkt),
            None => self.wkt.clone(),
        }
    }
}
