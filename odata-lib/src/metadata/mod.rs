//! Convention-driven resource metadata.
//!
//! A [`MetadataBuilder`] is created for every resource occurrence that is
//! being read or written. It answers questions about the resource (id, edit
//! link, ETag, navigation links, operation targets...) by preferring what the
//! payload supplied and otherwise deriving the answer from the model and the
//! URL conventions.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use odata_lib::config::ConventionConfig;
//! use odata_lib::metadata::{
//!     ConventionalMetadataBuilder, MetadataBuilder, MetadataContext, ResourceMetadataBuilder,
//!     ResourceMetadataContext, SelectedProperties,
//! };
//! use odata_lib::model::Resource;
//! use odata_lib::model::metadata::{EdmModel, EntityType, NavigationSource, PrimitiveKind};
//! use url::Url;
//!
//! let model = EdmModel::new("Sales", "Container")
//!     .entity_type(EntityType::new("Sales", "Customer").key("Id", PrimitiveKind::Int32))
//!     .source(NavigationSource::entity_set("Customers", "Sales.Customer"));
//! let service = MetadataContext::new(Url::parse("http://host/").unwrap(), ConventionConfig::default())
//!     .unwrap()
//!     .with_model(model);
//!
//! let customer = Resource::new("Sales.Customer").set("Id", 5i32);
//! let type_context = service.type_context_for_source("Customers").unwrap();
//! let context = ResourceMetadataContext::new(
//!     &customer,
//!     type_context,
//!     &service,
//!     SelectedProperties::EntireSubtree,
//!     true,
//! )
//! .unwrap();
//! let builder = Rc::new(MetadataBuilder::from(ConventionalMetadataBuilder::new(context)));
//!
//! assert_eq!(builder.get_id().unwrap().unwrap().as_str(), "http://host/Customers(5)");
//! ```

mod builder;
mod context;
mod operations;
mod resource_context;
mod select;
mod type_context;

use std::cell::OnceCell;

pub use builder::*;
pub use context::*;
pub use operations::*;
pub use resource_context::*;
pub use select::*;
pub use type_context::*;

use crate::error::Result;

/// Returns the memoized value, computing and freezing it on first success.
///
/// A failed computation leaves the cell empty, so the error is raised again
/// on the next access.
pub(crate) fn memoize<T>(cell: &OnceCell<T>, init: impl FnOnce() -> Result<T>) -> Result<&T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}
