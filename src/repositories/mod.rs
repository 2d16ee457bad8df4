//! Repository layer.
//!
//! Handlers talk to [`UserRepository`]; the repository talks to a
//! [`DocumentStore`](crate::store::DocumentStore).

pub mod user_repository;

pub use user_repository::UserRepository;
