//! Client for the `ticket-comments` controller.

use std::sync::Arc;

use tracing::info_span;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::Transport;
use crate::metrics::MetricsSink;
use crate::model::{
    CommentByUserRequest, CommentCreateRequest, CommentFetchAllRequest, CommentUpdateRequest,
    DeleteRequest, FetchRequest, Page, TicketComment,
};

pub struct TicketCommentService {
    envelope: Envelope,
}

impl TicketCommentService {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        transport: Arc<dyn Transport>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            envelope: Envelope::new(endpoint, api_key, "ticket-comments", transport, metrics),
        }
    }

    pub fn create(&self, request: &CommentCreateRequest) -> Result<TicketComment, ApiError> {
        let _span = info_span!(
            "create_comment",
            user_id = %request.user_id,
            ticket_pk = %request.ticket_partition_key,
            ticket_rk = %request.ticket_range_key,
            message_len = request.message.len(),
        )
        .entered();
        self.envelope
            .post("TicketCommentService.Create", "create", request)
    }

    pub fn fetch(
        &self,
        partition_key: &str,
        range_key: &str,
        user_id: &str,
    ) -> Result<TicketComment, ApiError> {
        let _span =
            info_span!("fetch_comment", user_id, pk = partition_key, rk = range_key).entered();
        let request = FetchRequest {
            partition_key: partition_key.to_string(),
            range_key: range_key.to_string(),
            user_id: user_id.to_string(),
        };
        self.envelope
            .post("TicketCommentService.Fetch", "fetch", &request)
    }

    pub fn fetch_all(
        &self,
        request: &CommentFetchAllRequest,
    ) -> Result<Page<TicketComment>, ApiError> {
        let _span = info_span!(
            "fetch_all_comments",
            user_id = %request.user_id,
            ticket_pk = %request.ticket_partition_key,
            ticket_rk = %request.ticket_range_key,
            last_rk = request.last_range_key.as_deref().unwrap_or(""),
        )
        .entered();
        self.envelope
            .post("TicketCommentService.FetchAll", "fetchAll", request)
    }

    pub fn fetch_by_user(
        &self,
        request: &CommentByUserRequest,
    ) -> Result<Page<TicketComment>, ApiError> {
        let _span = info_span!(
            "fetch_comments_by_user",
            user_id = %request.user_id,
            last_rk = request.last_range_key.as_deref().unwrap_or(""),
        )
        .entered();
        self.envelope
            .post("TicketCommentService.FetchByUser", "fetchByUser", request)
    }

    pub fn update(&self, request: &CommentUpdateRequest) -> Result<bool, ApiError> {
        let _span = info_span!(
            "update_comment",
            user_id = %request.user_id,
            pk = %request.comment.partition_key,
            rk = %request.comment.range_key,
        )
        .entered();
        self.envelope
            .post("TicketCommentService.Update", "update", request)
    }

    pub fn delete(&self, request: &DeleteRequest) -> Result<bool, ApiError> {
        let _span = info_span!(
            "delete_comment",
            user_id = %request.user_id,
            pk = %request.partition_key,
            rk = %request.range_key,
        )
        .entered();
        self.envelope
            .post("TicketCommentService.Delete", "delete", request)
    }
}
