//! Read-only views over the registries for the reporting collaborators.

pub mod catalog;
pub mod selection;

pub use catalog::{Catalog, CatalogEntry};
pub use selection::{select, Selection};
