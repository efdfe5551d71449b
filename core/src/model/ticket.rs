//! Ticket records and their request payloads.

use serde::{Deserialize, Serialize};

/// A ticket as stored by the remote service.
///
/// `partition_key` is `{client_id}_{team_range_key}`; `range_key` is a
/// time-ordered unique token, so tickets sort chronologically within a
/// partition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    pub partition_key: String,
    pub range_key: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub comments: String,
    pub files: String,
    pub severity: i32,
    pub status: String,
    pub status_history: String,
    pub assigned_user_id: String,
    pub user_id: String,
    pub created: String,
    pub modified: String,
    pub resolution_limit: String,
    pub campaign_partition_key: String,
    pub campaign_range_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketCreateRequest {
    pub client_id: String,
    pub team_range_key: String,
    pub title: String,
    pub description: String,
    pub files: String,
    pub severity: i32,
    pub user_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketFetchAllRequest {
    pub client_id: String,
    pub team_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_range_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketByUserRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_partition_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_range_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketUpdateRequest {
    pub user_id: String,
    pub ticket: Ticket,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_all_omits_an_absent_cursor() {
        let request = TicketFetchAllRequest {
            client_id: "c1".to_string(),
            team_id: "t1".to_string(),
            user_id: "u1".to_string(),
            last_range_key: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("last_range_key").is_none());
    }

    #[test]
    fn fetch_all_forwards_a_cursor_unmodified() {
        let request = TicketFetchAllRequest {
            client_id: "c1".to_string(),
            team_id: "t1".to_string(),
            user_id: "u1".to_string(),
            last_range_key: Some("0189-aaaa".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["last_range_key"], "0189-aaaa");
    }
}
