mod collection;
pub mod directory;
mod memory;
mod store;

pub use collection::RecordStore;
pub use directory::DirectoryStore;
pub use memory::MemoryStore;
pub use store::{KeyValueStore, StoreError};
