//! Client for the `teams` controller.

use std::sync::Arc;

use tracing::info_span;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::Transport;
use crate::metrics::MetricsSink;
use crate::model::{
    DeleteRequest, FetchRequest, Page, TeamCreateRequest, TeamFetchAllRequest, TeamUpdateRequest,
    TicketTeam,
};

pub struct TicketTeamService {
    envelope: Envelope,
}

impl TicketTeamService {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        transport: Arc<dyn Transport>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            envelope: Envelope::new(endpoint, api_key, "teams", transport, metrics),
        }
    }

    pub fn create(&self, request: &TeamCreateRequest) -> Result<TicketTeam, ApiError> {
        let _span = info_span!(
            "create_team",
            user_id = %request.user_id,
            client_id = %request.client_id,
            title = %request.title,
        )
        .entered();
        self.envelope
            .post("TicketTeamService.Create", "create", request)
    }

    pub fn fetch(
        &self,
        partition_key: &str,
        range_key: &str,
        user_id: &str,
    ) -> Result<TicketTeam, ApiError> {
        let _span = info_span!("fetch_team", user_id, pk = partition_key, rk = range_key).entered();
        let request = FetchRequest {
            partition_key: partition_key.to_string(),
            range_key: range_key.to_string(),
            user_id: user_id.to_string(),
        };
        self.envelope
            .post("TicketTeamService.Fetch", "fetch", &request)
    }

    pub fn fetch_all(
        &self,
        client_id: &str,
        last_range_key: Option<String>,
    ) -> Result<Page<TicketTeam>, ApiError> {
        let _span = info_span!(
            "fetch_all_teams",
            client_id,
            last_rk = last_range_key.as_deref().unwrap_or(""),
        )
        .entered();
        let request = TeamFetchAllRequest {
            client_id: client_id.to_string(),
            last_range_key,
        };
        self.envelope
            .post("TicketTeamService.FetchAll", "fetchAll", &request)
    }

    pub fn update(&self, user_id: &str, team: &TicketTeam) -> Result<bool, ApiError> {
        let _span = info_span!(
            "update_team",
            user_id,
            pk = %team.partition_key,
            rk = %team.range_key,
        )
        .entered();
        let request = TeamUpdateRequest {
            user_id: user_id.to_string(),
            team: team.clone(),
        };
        self.envelope
            .post("TicketTeamService.Update", "update", &request)
    }

    pub fn delete(&self, request: &DeleteRequest) -> Result<bool, ApiError> {
        let _span = info_span!(
            "delete_team",
            user_id = %request.user_id,
            pk = %request.partition_key,
            rk = %request.range_key,
        )
        .entered();
        self.envelope
            .post("TicketTeamService.Delete", "delete", request)
    }
}
