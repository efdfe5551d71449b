//! Ticket team records and their request payloads.

use serde::{Deserialize, Serialize};

/// A team that owns tickets. `partition_key` is the client id; `range_key`
/// is a sortable unique token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketTeam {
    pub partition_key: String,
    pub range_key: String,
    pub title: String,
    pub description: String,
    pub user_id: String,
    pub category: String,
    pub created: String,
    pub modified: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamCreateRequest {
    pub client_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub email: String,
    pub name: String,
    pub user_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamFetchAllRequest {
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_range_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamUpdateRequest {
    pub user_id: String,
    pub team: TicketTeam,
}
