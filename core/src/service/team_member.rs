//! Client for the `teammembers` controller.

use std::sync::Arc;

use tracing::info_span;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::Transport;
use crate::metrics::MetricsSink;
use crate::model::{
    DeleteRequest, FetchRequest, Page, TeamMember, TeamMemberByUserRequest,
    TeamMemberCreateRequest, TeamMemberFetchAllRequest, TeamMemberUpdateRequest,
};

pub struct TeamMemberService {
    envelope: Envelope,
}

impl TeamMemberService {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        transport: Arc<dyn Transport>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            envelope: Envelope::new(endpoint, api_key, "teammembers", transport, metrics),
        }
    }

    pub fn create(&self, request: &TeamMemberCreateRequest) -> Result<TeamMember, ApiError> {
        let _span = info_span!(
            "create_team_member",
            user_id = %request.user_id,
            requester = %request.requester_user_id,
            client_id = %request.client_id,
            team_id = %request.ticket_team_id,
        )
        .entered();
        self.envelope
            .post("TicketTeamMemberService.Create", "create", request)
    }

    /// Fetches one member; the caller's email travels in the lookup's
    /// `user_id` slot, matching the remote contract.
    pub fn fetch(
        &self,
        email: &str,
        partition_key: &str,
        range_key: &str,
    ) -> Result<TeamMember, ApiError> {
        let _span =
            info_span!("fetch_team_member", email, pk = partition_key, rk = range_key).entered();
        let request = FetchRequest {
            partition_key: partition_key.to_string(),
            range_key: range_key.to_string(),
            user_id: email.to_string(),
        };
        self.envelope
            .post("TicketTeamMemberService.Fetch", "fetch", &request)
    }

    pub fn fetch_all(
        &self,
        request: &TeamMemberFetchAllRequest,
    ) -> Result<Page<TeamMember>, ApiError> {
        let _span = info_span!(
            "fetch_all_team_members",
            user_id = %request.user_id,
            client_id = %request.client_id,
            team_id = %request.ticket_team_id,
            last_rk = request.last_range_key.as_deref().unwrap_or(""),
        )
        .entered();
        self.envelope
            .post("TicketTeamMemberService.FetchAll", "fetchAll", request)
    }

    pub fn fetch_by_user(
        &self,
        request: &TeamMemberByUserRequest,
    ) -> Result<Page<TeamMember>, ApiError> {
        let _span = info_span!(
            "fetch_team_members_by_user",
            user_id = %request.user_id,
            last_rk = request.last_range_key.as_deref().unwrap_or(""),
        )
        .entered();
        self.envelope
            .post("TicketTeamMemberService.FetchByUser", "fetchByUser", request)
    }

    pub fn update(&self, user_id: &str, member: &TeamMember) -> Result<bool, ApiError> {
        let _span = info_span!(
            "update_team_member",
            user_id,
            pk = %member.partition_key,
            rk = %member.range_key,
        )
        .entered();
        let request = TeamMemberUpdateRequest {
            user_id: user_id.to_string(),
            team_member: member.clone(),
        };
        self.envelope
            .post("TicketTeamMemberService.Update", "update", &request)
    }

    pub fn delete(&self, request: &DeleteRequest) -> Result<bool, ApiError> {
        let _span = info_span!(
            "delete_team_member",
            user_id = %request.user_id,
            pk = %request.partition_key,
            rk = %request.range_key,
        )
        .entered();
        self.envelope
            .post("TicketTeamMemberService.Delete", "delete", request)
    }
}
