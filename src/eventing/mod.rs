//! Eventing - Service to Consumer Events

pub mod app_event;
