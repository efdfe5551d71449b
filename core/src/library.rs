//! Facade wiring all five service clients to one configuration.

use std::sync::Arc;

use crate::http::Transport;
use crate::metrics::MetricsSink;
use crate::service::{
    TeamMemberService, TicketCommentService, TicketService, TicketTeamService, TicketWatchService,
};

/// Construction-time configuration for the whole library.
///
/// `autocut_key` is the automation identity used for system-authored
/// tickets. It is deliberately optional: a library built without one will
/// refuse `create_autocut` instead of inventing an author.
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    pub endpoint: String,
    pub api_key: String,
    pub client_id: String,
    pub team_id: String,
    pub autocut_key: Option<String>,
}

/// One fully wired client per entity family, sharing a single transport and
/// metrics sink. Immutable after construction; cheap to share behind an
/// `Arc` and safe to call from multiple threads.
pub struct TicketLibrary {
    client_id: String,
    team_id: String,
    pub tickets: TicketService,
    pub comments: TicketCommentService,
    pub watches: TicketWatchService,
    pub teams: TicketTeamService,
    pub team_members: TeamMemberService,
}

impl TicketLibrary {
    pub fn new(
        config: LibraryConfig,
        transport: Arc<dyn Transport>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        let LibraryConfig {
            endpoint,
            api_key,
            client_id,
            team_id,
            autocut_key,
        } = config;
        Self {
            tickets: TicketService::new(
                endpoint.clone(),
                api_key.clone(),
                client_id.clone(),
                team_id.clone(),
                autocut_key,
                Arc::clone(&transport),
                Arc::clone(&metrics),
            ),
            comments: TicketCommentService::new(
                endpoint.clone(),
                api_key.clone(),
                Arc::clone(&transport),
                Arc::clone(&metrics),
            ),
            watches: TicketWatchService::new(
                endpoint.clone(),
                api_key.clone(),
                Arc::clone(&transport),
                Arc::clone(&metrics),
            ),
            teams: TicketTeamService::new(
                endpoint.clone(),
                api_key.clone(),
                Arc::clone(&transport),
                Arc::clone(&metrics),
            ),
            team_members: TeamMemberService::new(endpoint, api_key, transport, metrics),
            client_id,
            team_id,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn team_id(&self) -> &str {
        &self.team_id
    }
}
