//! DTO modules that bridge services with the JSON API and the form controller.

pub mod api;
pub mod registration;
pub mod search;
