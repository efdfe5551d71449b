//! Watch entries: one record per (user, ticket) pair.
//!
//! The range key is always the watched ticket's own
//! `{partition_key}_{range_key}` pair, which makes both directions cheap:
//! everything a user watches lives under their partition, and everyone
//! watching a ticket shares a range key.

use serde::{Deserialize, Serialize};

/// A user's watch on a ticket, with a denormalized snapshot of the ticket's
/// title/status as of the last update that touched it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketWatch {
    /// The watching user's id.
    pub partition_key: String,
    /// `{ticket_partition_key}_{ticket_range_key}`.
    pub range_key: String,
    pub role: String,
    pub ticket_title: String,
    pub ticket_status: String,
    pub last_updated: String,
    pub unread_updates: i32,
    pub watching_since: String,
    pub created: String,
    pub modified: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchAddRequest {
    pub user_id: String,
    pub ticket_partition_key: String,
    pub ticket_range_key: String,
    pub role: String,
}

/// Removes a watch entry by its own key pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchRemoveRequest {
    pub user_id: String,
    pub partition_key: String,
    pub range_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchUserListRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_range_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchersListRequest {
    pub ticket_partition_key: String,
    pub ticket_range_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_partition_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_range_key: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchMarkReadRequest {
    pub user_id: String,
    pub ticket_partition_key: String,
    pub ticket_range_key: String,
}

/// Pushed when the watched ticket changes: refreshes the snapshot fields on
/// every watcher's entry and bumps their unread counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchUpdateRequest {
    pub user_id: String,
    pub ticket_partition_key: String,
    pub ticket_range_key: String,
    pub ticket_title: String,
    pub ticket_status: String,
    pub last_updated: String,
}
