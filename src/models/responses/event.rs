//! Event-related response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Event, EventSummary};

fn to_chrono(date: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(date.timestamp_millis()).unwrap_or_default()
}

/// Event joined into a user (participants omitted)
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct EventSummaryResponse {
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[schema(example = "Board game night")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Id of the user that created the event
    pub creator: String,
}

impl From<EventSummary> for EventSummaryResponse {
    fn from(event: EventSummary) -> Self {
        Self {
            id: event.id.to_hex(),
            title: event.title,
            description: event.description,
            location: event.location,
            date: event.date.map(to_chrono),
            creator: event.creator.to_hex(),
        }
    }
}

/// Full event, as listed for its creator
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct EventResponse {
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[schema(example = "Board game night")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub creator: String,
    /// Ids of participating users
    pub participants: Vec<String>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: event.title,
            description: event.description,
            location: event.location,
            date: event.date.map(to_chrono),
            creator: event.creator.to_hex(),
            participants: event.participants.iter().map(|id| id.to_hex()).collect(),
        }
    }
}
