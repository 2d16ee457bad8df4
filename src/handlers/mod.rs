//! HTTP request handlers organized by domain.

pub mod event_handler;
pub mod user_handler;

pub use event_handler::*;
pub use user_handler::*;
