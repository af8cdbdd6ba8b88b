pub mod cli;
pub mod dashboard;
pub mod settings;
pub mod tasks;
