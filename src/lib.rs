//! User service of the event coordination app.
//!
//! [`repositories::UserRepository`] holds the user operations; it reaches
//! MongoDB through the [`store::DocumentStore`] trait. The `handlers` and
//! `routes` modules expose it over HTTP with actix-web.

pub mod config;
pub mod constants;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod routes;
pub mod store;
pub mod utils;
pub mod validators;
