//! Typed client for a remote ticketing service.
//!
//! # Overview
//! Wraps the service's tickets, comments, watchers, teams, and team members
//! behind strongly-typed request/response structures. Every operation goes
//! through the same envelope: serialize the request, execute one HTTP round
//! trip against a fixed endpoint routed by `controller`/`action` params,
//! time it, classify the answer, and hand back a typed result or a small
//! typed error.
//!
//! # Design
//! - The HTTP round trip lives behind the [`Transport`] trait; requests and
//!   responses are plain data, so test doubles need no network.
//! - Call durations land in a [`MetricsSink`] keyed by operation name,
//!   success or failure alike.
//! - Configuration is immutable after [`TicketLibrary::new`]; the library
//!   holds no other state, so concurrent use needs no locking.
//! - List calls return a [`model::Page`] with an optional continuation
//!   cursor; thread it back unmodified to page forward.

pub mod error;
pub mod http;
pub mod library;
pub mod metrics;
pub mod model;
pub mod service;

mod envelope;

pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use library::{LibraryConfig, TicketLibrary};
pub use metrics::{MetricsSink, NoopMetrics};
pub use service::{
    TeamMemberService, TicketCommentService, TicketService, TicketTeamService, TicketWatchService,
};
