//! Event documents as read by the user repository.
//!
//! Events are written elsewhere; here they are only joined into users and
//! listed by creator.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Event document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<mongodb::bson::DateTime>,
    /// The user that created the event.
    pub creator: ObjectId,
    #[serde(default)]
    pub participants: Vec<ObjectId>,
}

impl Event {
    /// The event without its participant list, or `None` if it was never stored.
    pub fn summary(&self) -> Option<EventSummary> {
        Some(EventSummary {
            id: self.id?,
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            date: self.date,
            creator: self.creator,
        })
    }
}

/// An event joined into a user, with `participants` stripped so that
/// user -> event -> user expansion cannot recurse.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<mongodb::bson::DateTime>,
    pub creator: ObjectId,
}
