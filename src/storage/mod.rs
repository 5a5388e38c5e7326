//! Durable key-value storage
//!
//! Backends the session store persists into: a directory of small files for
//! real use and a shared in-memory map for tests.

pub mod backend;
pub mod filesystem;
pub mod memory;
pub mod validation;

pub use backend::KeyValueStore;
pub use filesystem::FileStore;
pub use memory::MemoryStore;
