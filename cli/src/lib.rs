//! taskflow-cli library - modules exposed for the binary and its tests

pub mod app;
pub mod commands;
pub mod logging;
pub mod render;
