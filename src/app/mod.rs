//! Application Layer
//!
//! Headless dashboard: service wiring, event draining and console output.

pub mod application;
pub mod dashboard;

pub use application::run;
