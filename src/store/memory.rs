//! In-memory document store used by the unit tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use regex::RegexBuilder;

use crate::constants::{ERR_INVALID_SEARCH_PATTERN, ERR_USERNAME_EXISTS, ERR_USER_MISSING_ID};
use crate::errors::{RepoResult, RepositoryError};
use crate::models::{Event, EventSummary, User};
use crate::store::DocumentStore;

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    events: Mutex<Vec<Event>>,
    /// When set, every operation fails with a store error.
    offline: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an event directly; events have no write path in the repository.
    pub fn insert_event(&self, mut event: Event) -> ObjectId {
        let id = event.id.unwrap_or_else(ObjectId::new);
        event.id = Some(id);
        lock(&self.events).push(event);
        id
    }

    pub fn remove_event(&self, id: ObjectId) {
        lock(&self.events).retain(|event| event.id != Some(id));
    }

    pub fn set_offline(&self, offline: bool) {
        *lock(&self.offline) = offline;
    }

    fn check_online(&self) -> RepoResult<()> {
        if *lock(&self.offline) {
            return Err(RepositoryError::store("connection refused"));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn duplicate_username() -> RepositoryError {
    RepositoryError::Conflict {
        message: ERR_USERNAME_EXISTS.to_string(),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_indexes(&self) -> RepoResult<()> {
        self.check_online()
    }

    async fn insert_user(&self, user: &User) -> RepoResult<ObjectId> {
        self.check_online()?;
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.username == user.username) {
            return Err(duplicate_username());
        }
        let id = ObjectId::new();
        users.push(User {
            id: Some(id),
            ..user.clone()
        });
        Ok(id)
    }

    async fn find_user(&self, username: &str) -> RepoResult<Option<User>> {
        self.check_online()?;
        Ok(lock(&self.users)
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn search_users(&self, pattern: &str, limit: i64) -> RepoResult<Vec<User>> {
        self.check_online()?;
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                RepositoryError::validation(format!("{}: {}", ERR_INVALID_SEARCH_PATTERN, e))
            })?;
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(lock(&self.users)
            .iter()
            .filter(|u| regex.is_match(&u.username))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn save_user(&self, user: &User) -> RepoResult<()> {
        self.check_online()?;
        let id = user
            .id
            .ok_or_else(|| RepositoryError::store(ERR_USER_MISSING_ID))?;
        let mut users = lock(&self.users);
        if users
            .iter()
            .any(|u| u.id != Some(id) && u.username == user.username)
        {
            return Err(duplicate_username());
        }
        match users.iter_mut().find(|u| u.id == Some(id)) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(RepositoryError::not_found(&user.username)),
        }
    }

    async fn delete_user(&self, username: &str) -> RepoResult<u64> {
        self.check_online()?;
        let mut users = lock(&self.users);
        match users.iter().position(|u| u.username == username) {
            Some(index) => {
                users.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_event_summaries(&self, ids: &[ObjectId]) -> RepoResult<Vec<EventSummary>> {
        self.check_online()?;
        Ok(lock(&self.events)
            .iter()
            .filter(|event| event.id.is_some_and(|id| ids.contains(&id)))
            .filter_map(Event::summary)
            .collect())
    }

    async fn find_events_by_creator(&self, creator: ObjectId) -> RepoResult<Vec<Event>> {
        self.check_online()?;
        Ok(lock(&self.events)
            .iter()
            .filter(|event| event.creator == creator)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str) -> User {
        User {
            id: None,
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            username: username.to_string(),
            email: "ada@example.com".to_string(),
            participating_in: vec![],
        }
    }

    #[actix_web::test]
    async fn test_save_of_vanished_user_is_not_found() {
        let store = MemoryStore::new();
        let ghost = User {
            id: Some(ObjectId::new()),
            ..user("ghost")
        };
        assert_eq!(
            store.save_user(&ghost).await,
            Err(RepositoryError::not_found("ghost"))
        );
        assert!(store.find_user("ghost").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_save_after_concurrent_delete_is_not_found() {
        let store = MemoryStore::new();
        let id = store.insert_user(&user("ada")).await.unwrap();
        let mut looked_up = store.find_user("ada").await.unwrap().unwrap();
        assert_eq!(looked_up.id, Some(id));

        assert_eq!(store.delete_user("ada").await.unwrap(), 1);
        looked_up.lastname = "Byron".to_string();

        let err = store.save_user(&looked_up).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.find_user("ada").await.unwrap().is_none());
    }
}
