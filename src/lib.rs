//! Terra Watch Client Library
//!
//! Monitoring client for a mine-safety sensor network: polls the backend for
//! sensor readings, sensor health and rockfall predictions, validates and
//! commits them to shared state, and renders a headless dashboard.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod helpers;
pub mod services;
pub mod state;
pub mod utils;
