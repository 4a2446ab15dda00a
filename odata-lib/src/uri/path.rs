//! Already-parsed request paths.

use crate::model::ODataValue;

/// One segment of a parsed request path.
///
/// Each segment records the type it addresses so that a path can be trimmed
/// and replayed without re-parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// `/Customers`
    EntitySet {
        name: String,
        entity_type: String,
    },
    /// `/Me`
    Singleton {
        name: String,
        entity_type: String,
    },
    /// `(5)` or `(A=1,B=2)`
    Key {
        keys: Vec<(String, ODataValue)>,
        entity_type: String,
    },
    /// `/Orders`
    Navigation {
        name: String,
        target_type: String,
        is_collection: bool,
    },
    /// `/Sales.VipCustomer`
    TypeCast { type_name: String },
    /// `/Sales.TopOrders()`
    Operation {
        name: String,
        return_type: Option<String>,
    },
}

impl PathSegment {
    /// Returns the type this segment addresses, if known.
    pub fn target_type(&self) -> Option<&str> {
        match self {
            Self::EntitySet { entity_type, .. }
            | Self::Singleton { entity_type, .. }
            | Self::Key { entity_type, .. } => Some(entity_type),
            Self::Navigation { target_type, .. } => Some(target_type),
            Self::TypeCast { type_name } => Some(type_name),
            Self::Operation { return_type, .. } => return_type.as_deref(),
        }
    }

    /// Returns `true` for navigation property and operation segments.
    pub fn is_navigation_or_operation(&self) -> bool {
        matches!(self, Self::Navigation { .. } | Self::Operation { .. })
    }
}

/// A request path, as produced by a URI parser.
///
/// # Example
///
/// ```
/// use odata_lib::model::ODataValue;
/// use odata_lib::uri::ODataPath;
///
/// let path = ODataPath::new()
///     .entity_set("Customers", "Sales.Customer")
///     .key([("Id", ODataValue::Int32(5))])
///     .navigation("Orders", "Sales.Order", true);
///
/// assert_eq!(path.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ODataPath {
    segments: Vec<PathSegment>,
}

impl ODataPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a path from segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Returns the segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends an entity set segment.
    pub fn entity_set(mut self, name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        self.segments.push(PathSegment::EntitySet {
            name: name.into(),
            entity_type: entity_type.into(),
        });
        self
    }

    /// Appends a singleton segment.
    pub fn singleton(mut self, name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Singleton {
            name: name.into(),
            entity_type: entity_type.into(),
        });
        self
    }

    /// Appends a key segment addressing the type of the previous segment.
    pub fn key<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = (K, ODataValue)>,
        K: Into<String>,
    {
        let entity_type = self
            .segments
            .last()
            .and_then(PathSegment::target_type)
            .unwrap_or_default()
            .to_string();
        self.segments.push(PathSegment::Key {
            keys: keys.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            entity_type,
        });
        self
    }

    /// Appends a navigation property segment.
    pub fn navigation(
        mut self,
        name: impl Into<String>,
        target_type: impl Into<String>,
        is_collection: bool,
    ) -> Self {
        self.segments.push(PathSegment::Navigation {
            name: name.into(),
            target_type: target_type.into(),
            is_collection,
        });
        self
    }

    /// Appends a type-cast segment.
    pub fn type_cast(mut self, type_name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::TypeCast {
            type_name: type_name.into(),
        });
        self
    }

    /// Appends an operation segment.
    pub fn operation(mut self, name: impl Into<String>, return_type: Option<String>) -> Self {
        self.segments.push(PathSegment::Operation {
            name: name.into(),
            return_type,
        });
        self
    }
}
