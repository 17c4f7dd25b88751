//! Utility Functions

pub mod config_store;
pub mod format;
