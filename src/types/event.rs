//! Calendar event entity
//!
//! An [`Event`] is a titled, time-bounded calendar entry with tags. Events are
//! built with [`Event::new`], replaced in place with [`Event::update`] and must
//! pass [`Event::validate`] before the store accepts them.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::time::{generate_id, now};

/// Calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<FixedOffset>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<FixedOffset>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<FixedOffset>,
}

impl Event {
    /// Create a new event with a fresh id and `created_at = updated_at = now`.
    ///
    /// The event is not validated; call [`Event::validate`] before storing it.
    pub fn new(
        title: String,
        start_time: DateTime<FixedOffset>,
        end_time: DateTime<FixedOffset>,
        tags: Vec<String>,
    ) -> Self {
        let now = now();
        Self {
            id: generate_id(),
            title,
            start_time,
            end_time,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all mutable fields and refresh `updated_at`
    pub fn update(
        &mut self,
        title: String,
        start_time: DateTime<FixedOffset>,
        end_time: DateTime<FixedOffset>,
        tags: Vec<String>,
    ) {
        self.title = title;
        self.start_time = start_time;
        self.end_time = end_time;
        self.tags = tags;
        self.updated_at = now();
    }

    /// Check the title is present and the time range is not inverted
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::new("title", "Title must not be empty"));
        }

        if self.start_time > self.end_time {
            return Err(ValidationError::new(
                "endTime",
                "End time must not be earlier than start time",
            ));
        }

        Ok(())
    }

    /// Whether any tag equals `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }
}

/// Partial update payload: only supplied fields replace the existing ones
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: Option<DateTime<FixedOffset>>,
    #[serde(rename = "endTime")]
    pub end_time: Option<DateTime<FixedOffset>>,
    pub tags: Option<Vec<String>>,
}

impl EventPatch {
    /// Merge the supplied fields over `event` and apply them as one update
    pub fn apply_to(self, event: &mut Event) {
        let title = self.title.unwrap_or_else(|| event.title.clone());
        let start_time = self.start_time.unwrap_or(event.start_time);
        let end_time = self.end_time.unwrap_or(event.end_time);
        let tags = self.tags.unwrap_or_else(|| event.tags.clone());

        event.update(title, start_time, end_time, tags);
    }
}

/// Field-level rejection of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Older data files may carry `"tags": null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
