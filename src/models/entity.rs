//! Messaging entity runtime information

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message counts of an entity's sub-queues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCountDetails {
    #[serde(default)]
    pub active_message_count: u64,
    #[serde(default)]
    pub dead_letter_message_count: u64,
    #[serde(default)]
    pub scheduled_message_count: u64,
    #[serde(default)]
    pub transfer_message_count: u64,
    #[serde(default)]
    pub transfer_dead_letter_message_count: u64,
}

impl MessageCountDetails {
    /// Sum over every sub-queue
    pub fn total(&self) -> u64 {
        self.active_message_count
            + self.dead_letter_message_count
            + self.scheduled_message_count
            + self.transfer_message_count
            + self.transfer_dead_letter_message_count
    }
}

/// Runtime information shared by queues, topics, and subscriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRuntimeInfo {
    /// Path of the entity
    pub path: String,

    /// Message counts of the sub-queues
    #[serde(default)]
    pub message_count_details: MessageCountDetails,

    /// When the entity was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the entity was last updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// When the entity was last accessed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessed_at: Option<DateTime<Utc>>,
}

impl EntityRuntimeInfo {
    /// Create runtime info for a path with no counts or timestamps
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message_count_details: MessageCountDetails::default(),
            created_at: None,
            updated_at: None,
            accessed_at: None,
        }
    }

    /// Most recent of the update and access timestamps
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        match (self.updated_at, self.accessed_at) {
            (Some(u), Some(a)) => Some(u.max(a)),
            (u, a) => u.or(a),
        }
    }
}
