//! Data models: parsed booking records, persisted entities, configuration.

pub mod booking;
pub mod config;
pub mod entities;
