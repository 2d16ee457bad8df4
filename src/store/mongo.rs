//! MongoDB implementation of the document store.

use async_trait::async_trait;
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crate::constants::{COLLECTION_EVENTS, COLLECTION_USERS, ERR_INSERT_NO_ID, ERR_USER_MISSING_ID};
use crate::errors::{RepoResult, RepositoryError};
use crate::models::{Event, EventSummary, User};
use crate::store::DocumentStore;
use crate::utils::mask_username;

pub struct MongoStore {
    users: Collection<User>,
    events: Collection<Event>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection(COLLECTION_USERS),
            events: db.collection(COLLECTION_EVENTS),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn create_indexes(&self) -> RepoResult<()> {
        info!("Creating database indexes for users and events collections...");

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users.create_index(username_index).await?;

        let creator_index = IndexModel::builder().keys(doc! { "creator": 1 }).build();
        self.events.create_index(creator_index).await?;

        info!("Database indexes created successfully");
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> RepoResult<ObjectId> {
        let result = self.users.insert_one(user).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| RepositoryError::store(ERR_INSERT_NO_ID))
    }

    async fn find_user(&self, username: &str) -> RepoResult<Option<User>> {
        debug!("Store: Finding user by username: {}", mask_username(username));
        Ok(self.users.find_one(doc! { "username": username }).await?)
    }

    async fn search_users(&self, pattern: &str, limit: i64) -> RepoResult<Vec<User>> {
        debug!("Store: Searching usernames matching /{}/i", pattern);
        let cursor = self
            .users
            .find(doc! { "username": { "$regex": pattern, "$options": "i" } })
            .limit(limit)
            .await
            .map_err(RepositoryError::from_search)?;

        cursor
            .try_collect()
            .await
            .map_err(RepositoryError::from_search)
    }

    async fn save_user(&self, user: &User) -> RepoResult<()> {
        let id = user
            .id
            .ok_or_else(|| RepositoryError::store(ERR_USER_MISSING_ID))?;
        let result = self.users.replace_one(doc! { "_id": id }, user).await?;

        if result.matched_count == 0 {
            return Err(RepositoryError::not_found(&user.username));
        }
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> RepoResult<u64> {
        let result = self.users.delete_one(doc! { "username": username }).await?;
        Ok(result.deleted_count)
    }

    async fn find_event_summaries(&self, ids: &[ObjectId]) -> RepoResult<Vec<EventSummary>> {
        debug!("Store: Loading {} event summaries", ids.len());
        let cursor = self
            .events
            .clone_with_type::<EventSummary>()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .projection(doc! { "participants": 0 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_events_by_creator(&self, creator: ObjectId) -> RepoResult<Vec<Event>> {
        debug!("Store: Finding events created by {}", creator);
        let cursor = self.events.find(doc! { "creator": creator }).await?;
        Ok(cursor.try_collect().await?)
    }
}
