//! Durable CRUD over the task collection.
//!
//! The whole collection lives under one key as a JSON array. Every mutation is
//! a full read, an in-memory change and a full write; there are no partial
//! updates and no change notifications, so callers reload after mutating.

pub mod codec;
pub mod task_store;

pub use codec::{decode_collection, encode_collection};
pub use task_store::{TaskStore, DEFAULT_TASKS_KEY};
