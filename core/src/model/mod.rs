//! Domain records and request payloads for the ticketing API.
//!
//! # Design
//! These types mirror the remote service's JSON schema field for field; the
//! mock-server crate defines its own copies independently, and the
//! integration tests catch any drift between the two. Every entity is a
//! flat record addressed by a `(partition_key, range_key)` pair, and every
//! list answer is a [`Page`] carrying an optional continuation cursor.

pub mod comment;
pub mod common;
pub mod team;
pub mod team_member;
pub mod ticket;
pub mod watch;

pub use comment::{
    CommentByUserRequest, CommentCreateRequest, CommentFetchAllRequest, CommentUpdateRequest,
    TicketComment,
};
pub use common::{DeleteRequest, FetchRequest, Page};
pub use team::{TeamCreateRequest, TeamFetchAllRequest, TeamUpdateRequest, TicketTeam};
pub use team_member::{
    TeamMember, TeamMemberByUserRequest, TeamMemberCreateRequest, TeamMemberFetchAllRequest,
    TeamMemberUpdateRequest,
};
pub use ticket::{
    Ticket, TicketByUserRequest, TicketCreateRequest, TicketFetchAllRequest, TicketUpdateRequest,
};
pub use watch::{
    TicketWatch, WatchAddRequest, WatchMarkReadRequest, WatchRemoveRequest, WatchUpdateRequest,
    WatchUserListRequest, WatchersListRequest,
};
