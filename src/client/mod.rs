//! Contact form front end: HTTP client for the message API and the form
//! state that drives it.

pub mod api;
pub mod form;
