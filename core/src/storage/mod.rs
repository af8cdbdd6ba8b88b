pub mod memory;
pub mod r#trait;

pub use memory::MemoryBlobStore;
pub use r#trait::BlobStore;
