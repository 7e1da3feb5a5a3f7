//! Database and configuration models shared across the trainer registry.

pub mod trainer;

#[cfg(feature = "server")]
pub mod config;
