// Service exports
pub mod catalog;
pub mod events;

pub use catalog::{CatalogError, InMemoryCatalog};
pub use events::{EventSink, TracingEventSink};
