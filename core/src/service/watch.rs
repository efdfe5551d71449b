//! Client for the `watchers` controller.
//!
//! Watch mutations POST a JSON body like everything else; the three list
//! reads are GET calls whose fields ride as query params. Cursor forwarding
//! follows the remote contract exactly: the user watch list forwards its
//! cursor only when non-empty, the watchers list forwards the pair only
//! when both halves are present, and the unread list never pages.

use std::sync::Arc;

use tracing::info_span;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::Transport;
use crate::metrics::MetricsSink;
use crate::model::{
    Page, TicketWatch, WatchAddRequest, WatchMarkReadRequest, WatchRemoveRequest,
    WatchUpdateRequest, WatchUserListRequest, WatchersListRequest,
};

pub struct TicketWatchService {
    envelope: Envelope,
}

impl TicketWatchService {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        transport: Arc<dyn Transport>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            envelope: Envelope::new(endpoint, api_key, "watchers", transport, metrics),
        }
    }

    pub fn add_watcher(&self, request: &WatchAddRequest) -> Result<TicketWatch, ApiError> {
        let _span = info_span!(
            "add_watcher",
            user_id = %request.user_id,
            ticket_pk = %request.ticket_partition_key,
            ticket_rk = %request.ticket_range_key,
        )
        .entered();
        self.envelope
            .post("TicketWatchService.AddWatcher", "addWatcher", request)
    }

    pub fn remove_watcher(&self, request: &WatchRemoveRequest) -> Result<bool, ApiError> {
        let _span = info_span!(
            "remove_watcher",
            user_id = %request.user_id,
            pk = %request.partition_key,
            rk = %request.range_key,
        )
        .entered();
        self.envelope
            .post("TicketWatchService.RemoveWatcher", "removeWatcher", request)
    }

    pub fn user_watch_list(
        &self,
        request: &WatchUserListRequest,
    ) -> Result<Page<TicketWatch>, ApiError> {
        let _span = info_span!(
            "user_watch_list",
            user_id = %request.user_id,
            last_rk = request.last_range_key.as_deref().unwrap_or(""),
        )
        .entered();
        let mut query = vec![("userId".to_string(), request.user_id.clone())];
        if let Some(cursor) = request.last_range_key.as_deref().filter(|c| !c.is_empty()) {
            query.push(("lastRangeKey".to_string(), cursor.to_string()));
        }
        self.envelope
            .get("TicketWatchService.GetUserWatchList", "getUserWatchList", query)
    }

    /// Entries with unread updates for one user. The unread set is assumed
    /// small; the remote does not page it.
    pub fn user_unread_list(
        &self,
        request: &WatchUserListRequest,
    ) -> Result<Page<TicketWatch>, ApiError> {
        let _span = info_span!("user_unread_list", user_id = %request.user_id).entered();
        let query = vec![("userId".to_string(), request.user_id.clone())];
        self.envelope.get(
            "TicketWatchService.GetUserUnreadList",
            "getUserUnreadList",
            query,
        )
    }

    pub fn ticket_watchers(
        &self,
        request: &WatchersListRequest,
    ) -> Result<Page<TicketWatch>, ApiError> {
        let _span = info_span!(
            "ticket_watchers",
            ticket_pk = %request.ticket_partition_key,
            ticket_rk = %request.ticket_range_key,
        )
        .entered();
        let mut query = vec![
            ("ticketPK".to_string(), request.ticket_partition_key.clone()),
            ("ticketRK".to_string(), request.ticket_range_key.clone()),
            ("userId".to_string(), request.user_id.clone()),
        ];
        if let (Some(last_pk), Some(last_rk)) =
            (&request.last_partition_key, &request.last_range_key)
        {
            if !last_pk.is_empty() {
                query.push(("lastPartitionKey".to_string(), last_pk.clone()));
                query.push(("lastRangeKey".to_string(), last_rk.clone()));
            }
        }
        self.envelope.get(
            "TicketWatchService.GetTicketWatchers",
            "getTicketWatchers",
            query,
        )
    }

    pub fn mark_as_read(&self, request: &WatchMarkReadRequest) -> Result<bool, ApiError> {
        let _span = info_span!(
            "mark_as_read",
            user_id = %request.user_id,
            ticket_pk = %request.ticket_partition_key,
            ticket_rk = %request.ticket_range_key,
        )
        .entered();
        self.envelope
            .post("TicketWatchService.MarkAsRead", "markAsRead", request)
    }

    pub fn update_watch_entry(&self, request: &WatchUpdateRequest) -> Result<bool, ApiError> {
        let _span = info_span!(
            "update_watch_entry",
            user_id = %request.user_id,
            ticket_pk = %request.ticket_partition_key,
            ticket_rk = %request.ticket_range_key,
        )
        .entered();
        self.envelope.post(
            "TicketWatchService.UpdateWatchEntry",
            "updateWatchEntry",
            request,
        )
    }
}
