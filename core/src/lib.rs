//! TaskFlow core: the task model, the blob-store contract and `TaskStore`.

pub mod api;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;
pub mod task;
