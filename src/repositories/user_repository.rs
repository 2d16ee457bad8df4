//! User repository: the operations callers use to create, read, update,
//! delete, and search users.
//!
//! Every operation is a short sequence of independent store calls. None of
//! them is atomic: a user deleted between the lookup and the write of
//! `update_field`/`update_fields` surfaces as `NotFound`, and a user deleted
//! between the two queries of `get_created_events` yields an empty list.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use mongodb::bson::{oid::ObjectId, Document};
use validator::Validate;

use crate::constants::{ERR_USER_MISSING_ID, MAX_SEARCH_RESULTS};
use crate::errors::{RepoResult, RepositoryError};
use crate::models::{Event, EventSummary, NewUser, User, UserUpdate, UserWithEvents};
use crate::store::DocumentStore;
use crate::utils::{mask_email, mask_username};

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create the indexes the repository relies on. Call once at startup.
    pub async fn create_indexes(&self) -> RepoResult<()> {
        self.store.create_indexes().await
    }

    /// Validate and persist a user built from a full document.
    pub async fn create_full(&self, new_user: NewUser) -> RepoResult<User> {
        new_user.validate().map_err(|e| {
            let err = RepositoryError::from(e);
            warn!("Create rejected: {}", err);
            err
        })?;

        let user = new_user.into_user();
        let id = self.store.insert_user(&user).await.inspect_err(|e| {
            warn!(
                "Create failed for user {} ({}): {}",
                mask_username(&user.username),
                e.kind(),
                e
            );
        })?;

        info!(
            "Created user {} <{}>",
            mask_username(&user.username),
            mask_email(&user.email)
        );
        Ok(User {
            id: Some(id),
            ..user
        })
    }

    /// Create a user from the mandatory fields only.
    pub async fn create_basic(
        &self,
        firstname: &str,
        lastname: &str,
        username: &str,
        email: &str,
    ) -> RepoResult<User> {
        self.create_full(NewUser::basic(firstname, lastname, username, email))
            .await
    }

    /// Set one field and persist. Returns the updated user with its events joined.
    pub async fn update_field(
        &self,
        username: &str,
        update: UserUpdate,
    ) -> RepoResult<UserWithEvents> {
        self.update_fields(username, vec![update]).await
    }

    /// Apply `updates` in order and persist once.
    ///
    /// Later updates to the same field overwrite earlier ones. All updates
    /// are validated before any is applied; if the save fails the in-memory
    /// copy is dropped and nothing is kept.
    pub async fn update_fields(
        &self,
        username: &str,
        updates: Vec<UserUpdate>,
    ) -> RepoResult<UserWithEvents> {
        for update in &updates {
            update.validate().inspect_err(|e| {
                warn!("Update of '{}' rejected: {}", update.field(), e);
            })?;
        }

        let mut user = self.store.find_user(username).await?.ok_or_else(|| {
            warn!("Update failed: user {} not found", mask_username(username));
            RepositoryError::not_found(username)
        })?;

        if updates.is_empty() {
            debug!("No changes requested for user {}", mask_username(username));
            return self.join(user).await;
        }

        let count = updates.len();
        for update in updates {
            update.apply(&mut user);
        }

        self.store.save_user(&user).await.inspect_err(|e| {
            warn!(
                "Saving user {} failed ({}): {}",
                mask_username(username),
                e.kind(),
                e
            );
        })?;

        info!(
            "Applied {} field update(s) to user {}",
            count,
            mask_username(username)
        );
        self.join(user).await
    }

    /// Delete the user. Succeeds whether or not a user matched.
    pub async fn delete_user(&self, username: &str) -> RepoResult<()> {
        let deleted = self.store.delete_user(username).await?;
        if deleted == 0 {
            debug!("Delete: no user {} to remove", mask_username(username));
        } else {
            info!("Deleted user {}", mask_username(username));
        }
        Ok(())
    }

    /// Exact lookup with `participatingIn` expanded.
    pub async fn get_user(&self, username: &str) -> RepoResult<Option<UserWithEvents>> {
        match self.store.find_user(username).await? {
            Some(user) => Ok(Some(self.join(user).await?)),
            None => {
                debug!("User {} not found", mask_username(username));
                Ok(None)
            }
        }
    }

    /// Exact lookup without expanding `participatingIn`.
    pub async fn get_raw_user(&self, username: &str) -> RepoResult<Option<User>> {
        self.store.find_user(username).await
    }

    /// Like [`get_user`](Self::get_user), as a detached BSON document.
    pub async fn get_user_as_document(&self, username: &str) -> RepoResult<Option<Document>> {
        match self.get_user(username).await? {
            Some(user) => Ok(Some(mongodb::bson::to_document(&user)?)),
            None => Ok(None),
        }
    }

    /// Whether `get_user` finds the user.
    ///
    /// This costs the same round trips as `get_user`; callers that need the
    /// record should call `get_user` directly.
    pub async fn user_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self.get_user(username).await?.is_some())
    }

    /// The events the user participates in, or `None` if the user is absent.
    pub async fn get_participating_events(
        &self,
        username: &str,
    ) -> RepoResult<Option<Vec<EventSummary>>> {
        Ok(self
            .get_user(username)
            .await?
            .map(|user| user.participating_in))
    }

    /// The events whose creator is the user, or `None` if the user is absent.
    pub async fn get_created_events(&self, username: &str) -> RepoResult<Option<Vec<Event>>> {
        let Some(user) = self.store.find_user(username).await? else {
            debug!("User {} not found", mask_username(username));
            return Ok(None);
        };
        let id = user
            .id
            .ok_or_else(|| RepositoryError::store(ERR_USER_MISSING_ID))?;

        Ok(Some(self.store.find_events_by_creator(id).await?))
    }

    /// Case-insensitive username search, at most `MAX_SEARCH_RESULTS` users.
    ///
    /// `search` is used as a regular expression, not a literal: `a.c` matches
    /// `abc`. Use [`find_matching_users_literal`](Self::find_matching_users_literal)
    /// for untrusted input.
    pub async fn find_matching_users(&self, search: &str) -> RepoResult<Vec<UserWithEvents>> {
        let users = self.store.search_users(search, MAX_SEARCH_RESULTS).await?;
        debug!("Search /{}/i matched {} user(s)", search, users.len());
        self.join_all(users).await
    }

    /// Case-insensitive literal substring search on usernames.
    pub async fn find_matching_users_literal(
        &self,
        search: &str,
    ) -> RepoResult<Vec<UserWithEvents>> {
        self.find_matching_users(&regex::escape(search)).await
    }

    async fn join(&self, user: User) -> RepoResult<UserWithEvents> {
        let mut joined = self.join_all(vec![user]).await?;
        joined
            .pop()
            .ok_or_else(|| RepositoryError::store("join dropped a user"))
    }

    /// Expand `participatingIn` of every user with a single event query.
    /// References to events that no longer exist are dropped.
    async fn join_all(&self, users: Vec<User>) -> RepoResult<Vec<UserWithEvents>> {
        let mut ids: Vec<ObjectId> = users
            .iter()
            .flat_map(|user| user.participating_in.iter().copied())
            .collect();
        ids.sort();
        ids.dedup();

        let events: HashMap<ObjectId, EventSummary> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.store
                .find_event_summaries(&ids)
                .await?
                .into_iter()
                .map(|event| (event.id, event))
                .collect()
        };

        Ok(users
            .into_iter()
            .map(|user| {
                let participating_in = user
                    .participating_in
                    .iter()
                    .filter_map(|id| events.get(id).cloned())
                    .collect();
                UserWithEvents::new(user, participating_in)
            })
            .collect())
    }
}
