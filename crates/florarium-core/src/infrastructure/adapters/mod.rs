//! Store adapters implementing the repository ports

mod memory_store;

pub use memory_store::MemoryStore;
