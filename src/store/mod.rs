pub mod error;
pub mod id;
pub mod memory;
pub mod models;
pub mod record_store;

pub use error::StoreError;
pub use id::RecordId;
pub use memory::MemoryStore;
pub use record_store::{RecordStore, SharedStore};
