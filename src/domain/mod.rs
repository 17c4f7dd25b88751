//! Domain - Pure Data Structures and Wire Types
//!
//! These types do no I/O and mirror the backend's JSON contract.

pub mod config;
pub mod health;
pub mod mine;
pub mod prediction;
pub mod reading;
pub mod settings;
pub mod user;
pub mod validation;
