//! Service implementations of the port traits.

mod catalog_embedded;
mod memory_session_store;

pub use catalog_embedded::EmbeddedCategoryCatalog;
pub use memory_session_store::MemorySessionStore;
