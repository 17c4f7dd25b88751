//! State - Client-Side State Modules
//!
//! Each state module holds one piece of state, written by exactly one owner.

pub mod log_state;
pub mod sensor_state;
