//! Shapes shared by every entity family: key-pair lookups, deletes, and
//! paged list answers.

use serde::{Deserialize, Deserializer, Serialize};

/// One page of a list call plus the continuation cursor.
///
/// A `None` cursor means there are no further pages. To page forward, both
/// cursor halves must be threaded into the next list request unmodified;
/// leaving them out restarts from the beginning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// The service serializes an absent result set as `null`.
    #[serde(default, deserialize_with = "nullable_vec")]
    pub results: Vec<T>,
    #[serde(default)]
    pub last_partition_key: Option<String>,
    #[serde(default)]
    pub last_range_key: Option<String>,
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Key-pair lookup body shared by every `fetch` action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchRequest {
    pub partition_key: String,
    pub range_key: String,
    pub user_id: String,
}

/// Delete body shared by every entity family. A soft delete marks the
/// record `DELETED`; a hard delete removes it outright.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteRequest {
    pub partition_key: String,
    pub range_key: String,
    pub is_hard_delete: bool,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_accepts_null_results_and_cursors() {
        let page: Page<String> = serde_json::from_str(
            r#"{"results":null,"last_partition_key":null,"last_range_key":null}"#,
        )
        .unwrap();
        assert!(page.results.is_empty());
        assert!(page.last_partition_key.is_none());
        assert!(page.last_range_key.is_none());
    }

    #[test]
    fn page_accepts_missing_fields() {
        let page: Page<String> = serde_json::from_str(r#"{}"#).unwrap();
        assert!(page.results.is_empty());
        assert!(page.last_range_key.is_none());
    }

    #[test]
    fn page_keeps_cursor_values() {
        let page: Page<String> = serde_json::from_str(
            r#"{"results":["a"],"last_partition_key":"c1","last_range_key":"r9"}"#,
        )
        .unwrap();
        assert_eq!(page.results, vec!["a".to_string()]);
        assert_eq!(page.last_partition_key.as_deref(), Some("c1"));
        assert_eq!(page.last_range_key.as_deref(), Some("r9"));
    }

    #[test]
    fn delete_request_serializes_the_hard_delete_flag() {
        let request = DeleteRequest {
            partition_key: "c1_t1".to_string(),
            range_key: "r1".to_string(),
            is_hard_delete: false,
            user_id: "u1".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["is_hard_delete"], false);
        assert_eq!(json["partition_key"], "c1_t1");
    }
}
