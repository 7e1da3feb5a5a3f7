//! Browser-side behaviour of the registration form and the search box,
//! expressed as plain state machines so it can be driven by any view layer.

pub mod draft;
pub mod form;
pub mod live;
pub mod submission;
pub mod summary;
pub mod validation;
