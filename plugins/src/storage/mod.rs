pub mod file;

pub use file::FileBlobStore;
