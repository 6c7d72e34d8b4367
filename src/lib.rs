pub mod log;

pub mod args;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod materialize;
pub mod name;
pub mod package_manager;
pub mod prompt;
pub mod reconcile;

pub use error::ScaffoldError;
