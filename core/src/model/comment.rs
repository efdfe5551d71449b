//! Ticket comment records and their request payloads.

use serde::{Deserialize, Serialize};

/// A comment on a ticket.
///
/// `partition_key` is the owning ticket's `{partition_key}_{range_key}`
/// pair; `range_key` is timestamp-derived so comments sort by age.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketComment {
    pub partition_key: String,
    pub range_key: String,
    pub user_id: String,
    pub message: String,
    pub files: String,
    pub created: String,
    pub modified: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentCreateRequest {
    pub ticket_partition_key: String,
    pub ticket_range_key: String,
    pub user_id: String,
    pub message: String,
    pub files: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentFetchAllRequest {
    pub ticket_partition_key: String,
    pub ticket_range_key: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_range_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentByUserRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_partition_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_range_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentUpdateRequest {
    pub user_id: String,
    pub comment: TicketComment,
}
