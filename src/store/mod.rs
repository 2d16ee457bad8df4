//! Document store boundary.
//!
//! The user repository only needs a handful of primitive operations from the
//! database; they are collected in [`DocumentStore`] so the repository can be
//! exercised without a running MongoDB.

pub mod mongo;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::errors::RepoResult;
use crate::models::{Event, EventSummary, User};

pub use mongo::MongoStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create the indexes the repository relies on (unique `username`).
    async fn create_indexes(&self) -> RepoResult<()>;

    /// Insert a new user and return its generated id.
    async fn insert_user(&self, user: &User) -> RepoResult<ObjectId>;

    /// Exact, case-sensitive lookup by username.
    async fn find_user(&self, username: &str) -> RepoResult<Option<User>>;

    /// Users whose username matches `pattern` as a case-insensitive regular
    /// expression, at most `limit` of them.
    async fn search_users(&self, pattern: &str, limit: i64) -> RepoResult<Vec<User>>;

    /// Replace the stored user with the same `_id`.
    ///
    /// Fails with `NotFound` when the user was deleted after it was read.
    async fn save_user(&self, user: &User) -> RepoResult<()>;

    /// Delete by username, returning how many documents were removed.
    async fn delete_user(&self, username: &str) -> RepoResult<u64>;

    /// Events with the given ids, without their `participants`. Missing ids
    /// are skipped; order is unspecified.
    async fn find_event_summaries(&self, ids: &[ObjectId]) -> RepoResult<Vec<EventSummary>>;

    /// All events whose `creator` is `creator`.
    async fn find_events_by_creator(&self, creator: ObjectId) -> RepoResult<Vec<Event>>;
}
