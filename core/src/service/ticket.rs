//! Client for the `tickets` controller.

use std::sync::Arc;

use tracing::{info_span, warn};

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::Transport;
use crate::metrics::MetricsSink;
use crate::model::{
    DeleteRequest, FetchRequest, Page, Ticket, TicketByUserRequest, TicketCreateRequest,
    TicketFetchAllRequest, TicketUpdateRequest,
};

/// Ticket CRUD plus the autocut path for system-authored tickets.
///
/// Unlike the other clients this one also carries the client/team identity,
/// because autocut tickets are filed against the configured team on behalf
/// of the automation user rather than a caller-supplied one.
pub struct TicketService {
    envelope: Envelope,
    client_id: String,
    team_id: String,
    autocut_key: Option<String>,
}

impl TicketService {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        client_id: impl Into<String>,
        team_id: impl Into<String>,
        autocut_key: Option<String>,
        transport: Arc<dyn Transport>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            envelope: Envelope::new(endpoint, api_key, "tickets", transport, metrics),
            client_id: client_id.into(),
            team_id: team_id.into(),
            autocut_key,
        }
    }

    pub fn create(&self, request: &TicketCreateRequest) -> Result<Ticket, ApiError> {
        let _span = info_span!(
            "create_ticket",
            user_id = %request.user_id,
            client_id = %request.client_id,
            team_rk = %request.team_range_key,
        )
        .entered();
        self.envelope.post("TicketService.Create", "create", request)
    }

    /// Files a system-authored ticket under the configured automation
    /// identity. Fails client-side if the library was built without one.
    pub fn create_autocut(
        &self,
        title: &str,
        description: &str,
        files: &str,
        severity: i32,
    ) -> Result<Ticket, ApiError> {
        let Some(autocut_key) = &self.autocut_key else {
            warn!(client_id = %self.client_id, "autocut requested without an automation identity");
            return Err(ApiError::MissingAutomationKey);
        };
        let request = TicketCreateRequest {
            client_id: self.client_id.clone(),
            team_range_key: self.team_id.clone(),
            title: title.to_string(),
            description: description.to_string(),
            files: files.to_string(),
            severity,
            user_id: autocut_key.clone(),
            status: "OPEN".to_string(),
        };
        let _span = info_span!(
            "create_autocut",
            client_id = %request.client_id,
            team_rk = %request.team_range_key,
            severity,
        )
        .entered();
        self.envelope
            .post("TicketService.CreateAutocut", "create", &request)
    }

    pub fn fetch(&self, partition_key: &str, range_key: &str) -> Result<Ticket, ApiError> {
        let _span = info_span!("fetch_ticket", pk = partition_key, rk = range_key).entered();
        let request = FetchRequest {
            partition_key: partition_key.to_string(),
            range_key: range_key.to_string(),
            user_id: String::new(),
        };
        self.envelope.post("TicketService.Fetch", "fetch", &request)
    }

    pub fn fetch_all(&self, request: &TicketFetchAllRequest) -> Result<Page<Ticket>, ApiError> {
        let _span = info_span!(
            "fetch_all_tickets",
            user_id = %request.user_id,
            client_id = %request.client_id,
            team_id = %request.team_id,
            last_rk = request.last_range_key.as_deref().unwrap_or(""),
        )
        .entered();
        self.envelope
            .post("TicketService.FetchAll", "fetchAll", request)
    }

    pub fn fetch_by_user(&self, request: &TicketByUserRequest) -> Result<Page<Ticket>, ApiError> {
        let _span = info_span!(
            "fetch_tickets_by_user",
            user_id = %request.user_id,
            last_pk = request.last_partition_key.as_deref().unwrap_or(""),
            last_rk = request.last_range_key.as_deref().unwrap_or(""),
        )
        .entered();
        self.envelope
            .post("TicketService.FetchByUser", "fetchByUser", request)
    }

    pub fn update(&self, user_id: &str, ticket: &Ticket) -> Result<bool, ApiError> {
        let _span = info_span!(
            "update_ticket",
            user_id,
            pk = %ticket.partition_key,
            rk = %ticket.range_key,
        )
        .entered();
        let request = TicketUpdateRequest {
            user_id: user_id.to_string(),
            ticket: ticket.clone(),
        };
        self.envelope.post("TicketService.Update", "update", &request)
    }

    pub fn delete(&self, request: &DeleteRequest) -> Result<bool, ApiError> {
        let _span = info_span!(
            "delete_ticket",
            user_id = %request.user_id,
            pk = %request.partition_key,
            rk = %request.range_key,
            hard = request.is_hard_delete,
        )
        .entered();
        self.envelope.post("TicketService.Delete", "delete", request)
    }
}
