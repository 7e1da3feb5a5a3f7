//! Domain aggregates exposed by the trainer registry service layer.

pub mod document;
pub mod trainer;
pub mod types;
