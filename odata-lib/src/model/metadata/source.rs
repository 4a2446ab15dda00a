//! Navigation sources

use serde::Deserialize;
use serde::Serialize;

/// Kind of navigation source a resource belongs to.
///
/// Decides how the resource's identity is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationSourceKind {
    /// Top-level entity set; identity is set URI plus key.
    #[default]
    EntitySet,
    /// Singleton; identity is the singleton URI.
    Singleton,
    /// Entity set contained in a parent entity via a navigation property.
    ContainedEntitySet,
    /// Unresolvable source; identity cannot be computed.
    UnknownEntitySet,
}

/// An entity set or singleton exposed by the entity container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NavigationSource {
    /// Name used in URLs (e.g., "Customers").
    pub name: String,

    /// Kind of source.
    pub kind: NavigationSourceKind,

    /// Fully qualified name of the declared entity type.
    pub entity_type: String,

    /// Property paths named by the `Core.OptimisticConcurrency` annotation.
    #[serde(default)]
    pub optimistic_concurrency: Vec<String>,
}

impl NavigationSource {
    /// Creates an entity set.
    pub fn entity_set(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NavigationSourceKind::EntitySet,
            entity_type: entity_type.into(),
            optimistic_concurrency: Vec::new(),
        }
    }

    /// Creates a singleton.
    pub fn singleton(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            kind: NavigationSourceKind::Singleton,
            ..Self::entity_set(name, entity_type)
        }
    }

    /// Sets the optimistic concurrency property paths.
    pub fn with_concurrency<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optimistic_concurrency = paths.into_iter().map(Into::into).collect();
        self
    }
}
