//! Team member records and their request payloads.

use serde::{Deserialize, Serialize};

/// A member of a ticket team.
///
/// `partition_key` is `{client_id}_{team_id}`. `level` is an ordinal
/// permission tier: 5 = admin, 4 = manager, 3 = hr, 2 = engineer,
/// 1 = intern. Contact details are stored obfuscated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub partition_key: String,
    pub range_key: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub obfuscated_email: String,
    pub user_id: String,
    pub created: String,
    pub modified: String,
    pub assigned_tickets: i32,
    pub level: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMemberCreateRequest {
    pub client_id: String,
    pub ticket_team_id: String,
    pub title: String,
    pub description: String,
    pub email: String,
    pub requester_user_id: String,
    pub user_id: String,
    pub status: String,
    pub level: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMemberFetchAllRequest {
    pub client_id: String,
    pub ticket_team_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_range_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMemberByUserRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_partition_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_range_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMemberUpdateRequest {
    pub user_id: String,
    pub team_member: TeamMember,
}
