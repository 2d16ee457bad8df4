//! Response models organized by domain.

pub mod api;
pub mod event;
pub mod user;

pub use api::*;
pub use event::*;
pub use user::*;
