//! In-memory stand-in for the remote ticketing service.
//!
//! # Design
//! The real service exposes one endpoint and routes on `controller` +
//! `action` query params, so this server does the same: `POST /` for
//! mutations (JSON bodies), `GET /` for the watcher list reads (query
//! params). Entities live in shared `HashMap`s keyed by
//! `(partition_key, range_key)`; range keys are minted as uuids. Every
//! non-200 answer carries the structured `{status_code, message}` payload
//! the client classifies on. DTOs are defined independently from the core
//! crate; integration tests catch any schema drift between the two.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
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

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketComment {
    pub partition_key: String,
    pub range_key: String,
    pub user_id: String,
    pub message: String,
    pub files: String,
    pub created: String,
    pub modified: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketTeam {
    pub partition_key: String,
    pub range_key: String,
    pub title: String,
    pub description: String,
    pub user_id: String,
    pub category: String,
    pub created: String,
    pub modified: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamMember {
    pub partition_key: String,
    pub range_key: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub obfuscated_email: String,
    pub user_id: String,
    pub created: String,
    pub modified: String,
    pub assigned_tickets: i32,
    pub level: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketWatch {
    pub partition_key: String,
    pub range_key: String,
    pub role: String,
    pub ticket_title: String,
    pub ticket_status: String,
    pub last_updated: String,
    pub unread_updates: i32,
    pub watching_since: String,
    pub created: String,
    pub modified: String,
}

#[derive(Serialize)]
struct PageBody<T> {
    results: Vec<T>,
    last_partition_key: Option<String>,
    last_range_key: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    status_code: u16,
    message: String,
}

#[derive(Deserialize)]
struct FetchRequest {
    partition_key: String,
    range_key: String,
    #[allow(dead_code)]
    user_id: String,
}

#[derive(Deserialize)]
struct DeleteRequest {
    partition_key: String,
    range_key: String,
    is_hard_delete: bool,
    #[allow(dead_code)]
    user_id: String,
}

#[derive(Deserialize)]
struct TicketCreateRequest {
    client_id: String,
    team_range_key: String,
    title: String,
    description: String,
    files: String,
    severity: i32,
    user_id: String,
    status: String,
}

#[derive(Deserialize)]
struct TicketFetchAllRequest {
    client_id: String,
    team_id: String,
    #[allow(dead_code)]
    user_id: String,
    #[serde(default)]
    #[allow(dead_code)]
    last_range_key: Option<String>,
}

#[derive(Deserialize)]
struct ByUserRequest {
    user_id: String,
    #[serde(default)]
    #[allow(dead_code)]
    last_partition_key: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    last_range_key: Option<String>,
}

#[derive(Deserialize)]
struct TicketUpdateRequest {
    #[allow(dead_code)]
    user_id: String,
    ticket: Ticket,
}

#[derive(Deserialize)]
struct CommentCreateRequest {
    ticket_partition_key: String,
    ticket_range_key: String,
    user_id: String,
    message: String,
    files: String,
}

#[derive(Deserialize)]
struct CommentFetchAllRequest {
    ticket_partition_key: String,
    ticket_range_key: String,
    #[allow(dead_code)]
    user_id: String,
    #[serde(default)]
    #[allow(dead_code)]
    last_range_key: Option<String>,
}

#[derive(Deserialize)]
struct CommentUpdateRequest {
    #[allow(dead_code)]
    user_id: String,
    comment: TicketComment,
}

#[derive(Deserialize)]
struct TeamCreateRequest {
    client_id: String,
    title: String,
    description: String,
    category: String,
    #[allow(dead_code)]
    email: String,
    #[allow(dead_code)]
    name: String,
    user_id: String,
    status: String,
}

#[derive(Deserialize)]
struct TeamFetchAllRequest {
    client_id: String,
    #[serde(default)]
    #[allow(dead_code)]
    last_range_key: Option<String>,
}

#[derive(Deserialize)]
struct TeamUpdateRequest {
    #[allow(dead_code)]
    user_id: String,
    team: TicketTeam,
}

#[derive(Deserialize)]
struct TeamMemberCreateRequest {
    client_id: String,
    ticket_team_id: String,
    title: String,
    description: String,
    email: String,
    #[allow(dead_code)]
    requester_user_id: String,
    user_id: String,
    status: String,
    level: i32,
}

#[derive(Deserialize)]
struct TeamMemberFetchAllRequest {
    client_id: String,
    ticket_team_id: String,
    #[allow(dead_code)]
    user_id: String,
    #[serde(default)]
    #[allow(dead_code)]
    last_range_key: Option<String>,
}

#[derive(Deserialize)]
struct TeamMemberUpdateRequest {
    #[allow(dead_code)]
    user_id: String,
    team_member: TeamMember,
}

#[derive(Deserialize)]
struct WatchAddRequest {
    user_id: String,
    ticket_partition_key: String,
    ticket_range_key: String,
    role: String,
}

#[derive(Deserialize)]
struct WatchRemoveRequest {
    #[allow(dead_code)]
    user_id: String,
    partition_key: String,
    range_key: String,
}

#[derive(Deserialize)]
struct WatchMarkReadRequest {
    user_id: String,
    ticket_partition_key: String,
    ticket_range_key: String,
}

#[derive(Deserialize)]
struct WatchUpdateRequest {
    user_id: String,
    ticket_partition_key: String,
    ticket_range_key: String,
    ticket_title: String,
    ticket_status: String,
    last_updated: String,
}

// ---------------------------------------------------------------------------
// Store and app wiring
// ---------------------------------------------------------------------------

type Key = (String, String);

#[derive(Default)]
pub struct StoreInner {
    tickets: HashMap<Key, Ticket>,
    comments: HashMap<Key, TicketComment>,
    teams: HashMap<Key, TicketTeam>,
    members: HashMap<Key, TeamMember>,
    watches: HashMap<Key, TicketWatch>,
}

pub type Db = Arc<RwLock<StoreInner>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(StoreInner::default()));
    Router::new()
        .route("/", get(handle_get).post(handle_post))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now_secs() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        .to_string()
}

fn key(partition_key: &str, range_key: &str) -> Key {
    (partition_key.to_string(), range_key.to_string())
}

fn err(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            status_code: status.as_u16(),
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn ok_json<T: Serialize>(value: T) -> Response {
    Json(value).into_response()
}

fn page<T: Serialize>(results: Vec<T>) -> Response {
    ok_json(PageBody {
        results,
        last_partition_key: None,
        last_range_key: None,
    })
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Response> {
    serde_json::from_str(body).map_err(|_| err(StatusCode::BAD_REQUEST, "Invalid request body"))
}

fn require_api_key(headers: &HeaderMap) -> Result<(), Response> {
    if headers.get("x-api-key").is_none() {
        return Err(err(StatusCode::FORBIDDEN, "Missing api key"));
    }
    Ok(())
}

fn obfuscate_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{first}***@{domain}"),
            None => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

async fn handle_post(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let controller = params.get("controller").map(String::as_str).unwrap_or("");
    let action = params.get("action").map(String::as_str).unwrap_or("");
    let result = match (controller, action) {
        ("tickets", "create") => create_ticket(&db, &body).await,
        ("tickets", "fetch") => fetch_ticket(&db, &body).await,
        ("tickets", "fetchAll") => fetch_all_tickets(&db, &body).await,
        ("tickets", "fetchByUser") => fetch_tickets_by_user(&db, &body).await,
        ("tickets", "update") => update_ticket(&db, &body).await,
        ("tickets", "delete") => delete_ticket(&db, &body).await,
        ("ticket-comments", "create") => create_comment(&db, &body).await,
        ("ticket-comments", "fetch") => fetch_comment(&db, &body).await,
        ("ticket-comments", "fetchAll") => fetch_all_comments(&db, &body).await,
        ("ticket-comments", "fetchByUser") => fetch_comments_by_user(&db, &body).await,
        ("ticket-comments", "update") => update_comment(&db, &body).await,
        ("ticket-comments", "delete") => delete_comment(&db, &body).await,
        ("teams", "create") => create_team(&db, &body).await,
        ("teams", "fetch") => fetch_team(&db, &body).await,
        ("teams", "fetchAll") => fetch_all_teams(&db, &body).await,
        ("teams", "update") => update_team(&db, &body).await,
        ("teams", "delete") => delete_team(&db, &body).await,
        ("teammembers", "create") => create_member(&db, &body).await,
        ("teammembers", "fetch") => fetch_member(&db, &body).await,
        ("teammembers", "fetchAll") => fetch_all_members(&db, &body).await,
        ("teammembers", "fetchByUser") => fetch_members_by_user(&db, &body).await,
        ("teammembers", "update") => update_member(&db, &body).await,
        ("teammembers", "delete") => delete_member(&db, &body).await,
        ("watchers", "addWatcher") => add_watcher(&db, &body).await,
        ("watchers", "removeWatcher") => remove_watcher(&db, &body).await,
        ("watchers", "markAsRead") => mark_as_read(&db, &body).await,
        ("watchers", "updateWatchEntry") => update_watch_entry(&db, &body).await,
        _ => Err(err(StatusCode::NOT_FOUND, "Unknown controller or action")),
    };
    result.unwrap_or_else(|resp| resp)
}

async fn handle_get(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = require_api_key(&headers) {
        return resp;
    }
    let controller = params.get("controller").map(String::as_str).unwrap_or("");
    let action = params.get("action").map(String::as_str).unwrap_or("");
    let result = match (controller, action) {
        ("watchers", "getUserWatchList") => user_watch_list(&db, &params).await,
        ("watchers", "getUserUnreadList") => user_unread_list(&db, &params).await,
        ("watchers", "getTicketWatchers") => ticket_watchers(&db, &params).await,
        _ => Err(err(StatusCode::NOT_FOUND, "Unknown controller or action")),
    };
    result.unwrap_or_else(|resp| resp)
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

async fn create_ticket(db: &Db, body: &str) -> Result<Response, Response> {
    let request: TicketCreateRequest = parse(body)?;
    let now = now_secs();
    let ticket = Ticket {
        partition_key: format!("{}_{}", request.client_id, request.team_range_key),
        range_key: Uuid::new_v4().to_string(),
        title: request.title,
        description: request.description,
        category: String::new(),
        comments: String::new(),
        files: request.files,
        severity: request.severity,
        status: request.status,
        status_history: String::new(),
        assigned_user_id: String::new(),
        user_id: request.user_id,
        created: now.clone(),
        modified: now,
        resolution_limit: String::new(),
        campaign_partition_key: String::new(),
        campaign_range_key: String::new(),
    };
    db.write().await.tickets.insert(
        key(&ticket.partition_key, &ticket.range_key),
        ticket.clone(),
    );
    Ok(ok_json(ticket))
}

async fn fetch_ticket(db: &Db, body: &str) -> Result<Response, Response> {
    let request: FetchRequest = parse(body)?;
    let store = db.read().await;
    match store
        .tickets
        .get(&key(&request.partition_key, &request.range_key))
    {
        Some(ticket) => Ok(ok_json(ticket.clone())),
        None => Err(err(StatusCode::NOT_FOUND, "Ticket not found")),
    }
}

async fn fetch_all_tickets(db: &Db, body: &str) -> Result<Response, Response> {
    let request: TicketFetchAllRequest = parse(body)?;
    let partition = format!("{}_{}", request.client_id, request.team_id);
    let store = db.read().await;
    let mut results: Vec<Ticket> = store
        .tickets
        .values()
        .filter(|t| t.partition_key == partition)
        .cloned()
        .collect();
    results.sort_by(|a, b| a.range_key.cmp(&b.range_key));
    Ok(page(results))
}

async fn fetch_tickets_by_user(db: &Db, body: &str) -> Result<Response, Response> {
    let request: ByUserRequest = parse(body)?;
    let store = db.read().await;
    let mut results: Vec<Ticket> = store
        .tickets
        .values()
        .filter(|t| t.user_id == request.user_id)
        .cloned()
        .collect();
    results.sort_by(|a, b| (&a.partition_key, &a.range_key).cmp(&(&b.partition_key, &b.range_key)));
    Ok(page(results))
}

async fn update_ticket(db: &Db, body: &str) -> Result<Response, Response> {
    let request: TicketUpdateRequest = parse(body)?;
    let mut store = db.write().await;
    let slot = key(&request.ticket.partition_key, &request.ticket.range_key);
    if !store.tickets.contains_key(&slot) {
        return Err(err(StatusCode::NOT_FOUND, "Ticket not found"));
    }
    let mut ticket = request.ticket;
    ticket.modified = now_secs();
    store.tickets.insert(slot, ticket);
    Ok(ok_json(true))
}

async fn delete_ticket(db: &Db, body: &str) -> Result<Response, Response> {
    let request: DeleteRequest = parse(body)?;
    let mut store = db.write().await;
    let slot = key(&request.partition_key, &request.range_key);
    if request.is_hard_delete {
        return match store.tickets.remove(&slot) {
            Some(_) => Ok(ok_json(true)),
            None => Err(err(StatusCode::NOT_FOUND, "Ticket not found")),
        };
    }
    match store.tickets.get_mut(&slot) {
        Some(ticket) => {
            ticket.status = "DELETED".to_string();
            ticket.modified = now_secs();
            Ok(ok_json(true))
        }
        None => Err(err(StatusCode::NOT_FOUND, "Ticket not found")),
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

async fn create_comment(db: &Db, body: &str) -> Result<Response, Response> {
    let request: CommentCreateRequest = parse(body)?;
    let mut store = db.write().await;
    let ticket_slot = key(&request.ticket_partition_key, &request.ticket_range_key);
    if !store.tickets.contains_key(&ticket_slot) {
        return Err(err(StatusCode::NOT_FOUND, "Ticket not found"));
    }
    let now = now_secs();
    let comment = TicketComment {
        partition_key: format!(
            "{}_{}",
            request.ticket_partition_key, request.ticket_range_key
        ),
        range_key: Uuid::new_v4().to_string(),
        user_id: request.user_id,
        message: request.message,
        files: request.files,
        created: now.clone(),
        modified: now,
    };
    store.comments.insert(
        key(&comment.partition_key, &comment.range_key),
        comment.clone(),
    );
    Ok(ok_json(comment))
}

async fn fetch_comment(db: &Db, body: &str) -> Result<Response, Response> {
    let request: FetchRequest = parse(body)?;
    let store = db.read().await;
    match store
        .comments
        .get(&key(&request.partition_key, &request.range_key))
    {
        Some(comment) => Ok(ok_json(comment.clone())),
        None => Err(err(StatusCode::NOT_FOUND, "Comment not found")),
    }
}

async fn fetch_all_comments(db: &Db, body: &str) -> Result<Response, Response> {
    let request: CommentFetchAllRequest = parse(body)?;
    let partition = format!(
        "{}_{}",
        request.ticket_partition_key, request.ticket_range_key
    );
    let store = db.read().await;
    let mut results: Vec<TicketComment> = store
        .comments
        .values()
        .filter(|c| c.partition_key == partition)
        .cloned()
        .collect();
    results.sort_by(|a, b| a.range_key.cmp(&b.range_key));
    Ok(page(results))
}

async fn fetch_comments_by_user(db: &Db, body: &str) -> Result<Response, Response> {
    let request: ByUserRequest = parse(body)?;
    let store = db.read().await;
    let mut results: Vec<TicketComment> = store
        .comments
        .values()
        .filter(|c| c.user_id == request.user_id)
        .cloned()
        .collect();
    results.sort_by(|a, b| (&a.partition_key, &a.range_key).cmp(&(&b.partition_key, &b.range_key)));
    Ok(page(results))
}

async fn update_comment(db: &Db, body: &str) -> Result<Response, Response> {
    let request: CommentUpdateRequest = parse(body)?;
    let mut store = db.write().await;
    let slot = key(&request.comment.partition_key, &request.comment.range_key);
    if !store.comments.contains_key(&slot) {
        return Err(err(StatusCode::NOT_FOUND, "Comment not found"));
    }
    let mut comment = request.comment;
    comment.modified = now_secs();
    store.comments.insert(slot, comment);
    Ok(ok_json(true))
}

async fn delete_comment(db: &Db, body: &str) -> Result<Response, Response> {
    let request: DeleteRequest = parse(body)?;
    let mut store = db.write().await;
    match store
        .comments
        .remove(&key(&request.partition_key, &request.range_key))
    {
        Some(_) => Ok(ok_json(true)),
        None => Err(err(StatusCode::NOT_FOUND, "Comment not found")),
    }
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

async fn create_team(db: &Db, body: &str) -> Result<Response, Response> {
    let request: TeamCreateRequest = parse(body)?;
    let now = now_secs();
    let team = TicketTeam {
        partition_key: request.client_id,
        range_key: Uuid::new_v4().to_string(),
        title: request.title,
        description: request.description,
        user_id: request.user_id,
        category: request.category,
        created: now.clone(),
        modified: now,
        status: request.status,
    };
    db.write()
        .await
        .teams
        .insert(key(&team.partition_key, &team.range_key), team.clone());
    Ok(ok_json(team))
}

async fn fetch_team(db: &Db, body: &str) -> Result<Response, Response> {
    let request: FetchRequest = parse(body)?;
    let store = db.read().await;
    match store
        .teams
        .get(&key(&request.partition_key, &request.range_key))
    {
        Some(team) => Ok(ok_json(team.clone())),
        None => Err(err(StatusCode::NOT_FOUND, "Team not found")),
    }
}

async fn fetch_all_teams(db: &Db, body: &str) -> Result<Response, Response> {
    let request: TeamFetchAllRequest = parse(body)?;
    let store = db.read().await;
    let mut results: Vec<TicketTeam> = store
        .teams
        .values()
        .filter(|t| t.partition_key == request.client_id)
        .cloned()
        .collect();
    results.sort_by(|a, b| a.range_key.cmp(&b.range_key));
    Ok(page(results))
}

async fn update_team(db: &Db, body: &str) -> Result<Response, Response> {
    let request: TeamUpdateRequest = parse(body)?;
    let mut store = db.write().await;
    let slot = key(&request.team.partition_key, &request.team.range_key);
    if !store.teams.contains_key(&slot) {
        return Err(err(StatusCode::NOT_FOUND, "Team not found"));
    }
    let mut team = request.team;
    team.modified = now_secs();
    store.teams.insert(slot, team);
    Ok(ok_json(true))
}

async fn delete_team(db: &Db, body: &str) -> Result<Response, Response> {
    let request: DeleteRequest = parse(body)?;
    let mut store = db.write().await;
    let slot = key(&request.partition_key, &request.range_key);
    if request.is_hard_delete {
        return match store.teams.remove(&slot) {
            Some(_) => Ok(ok_json(true)),
            None => Err(err(StatusCode::NOT_FOUND, "Team not found")),
        };
    }
    match store.teams.get_mut(&slot) {
        Some(team) => {
            team.status = "DELETED".to_string();
            team.modified = now_secs();
            Ok(ok_json(true))
        }
        None => Err(err(StatusCode::NOT_FOUND, "Team not found")),
    }
}

// ---------------------------------------------------------------------------
// Team members
// ---------------------------------------------------------------------------

async fn create_member(db: &Db, body: &str) -> Result<Response, Response> {
    let request: TeamMemberCreateRequest = parse(body)?;
    let now = now_secs();
    let member = TeamMember {
        partition_key: format!("{}_{}", request.client_id, request.ticket_team_id),
        range_key: Uuid::new_v4().to_string(),
        title: request.title,
        description: request.description,
        status: request.status,
        obfuscated_email: obfuscate_email(&request.email),
        user_id: request.user_id,
        created: now.clone(),
        modified: now,
        assigned_tickets: 0,
        level: request.level,
    };
    db.write()
        .await
        .members
        .insert(key(&member.partition_key, &member.range_key), member.clone());
    Ok(ok_json(member))
}

async fn fetch_member(db: &Db, body: &str) -> Result<Response, Response> {
    let request: FetchRequest = parse(body)?;
    let store = db.read().await;
    match store
        .members
        .get(&key(&request.partition_key, &request.range_key))
    {
        Some(member) => Ok(ok_json(member.clone())),
        None => Err(err(StatusCode::NOT_FOUND, "Team member not found")),
    }
}

async fn fetch_all_members(db: &Db, body: &str) -> Result<Response, Response> {
    let request: TeamMemberFetchAllRequest = parse(body)?;
    let partition = format!("{}_{}", request.client_id, request.ticket_team_id);
    let store = db.read().await;
    let mut results: Vec<TeamMember> = store
        .members
        .values()
        .filter(|m| m.partition_key == partition)
        .cloned()
        .collect();
    results.sort_by(|a, b| a.range_key.cmp(&b.range_key));
    Ok(page(results))
}

async fn fetch_members_by_user(db: &Db, body: &str) -> Result<Response, Response> {
    let request: ByUserRequest = parse(body)?;
    let store = db.read().await;
    let mut results: Vec<TeamMember> = store
        .members
        .values()
        .filter(|m| m.user_id == request.user_id)
        .cloned()
        .collect();
    results.sort_by(|a, b| (&a.partition_key, &a.range_key).cmp(&(&b.partition_key, &b.range_key)));
    Ok(page(results))
}

async fn update_member(db: &Db, body: &str) -> Result<Response, Response> {
    let request: TeamMemberUpdateRequest = parse(body)?;
    let mut store = db.write().await;
    let slot = key(
        &request.team_member.partition_key,
        &request.team_member.range_key,
    );
    if !store.members.contains_key(&slot) {
        return Err(err(StatusCode::NOT_FOUND, "Team member not found"));
    }
    let mut member = request.team_member;
    member.modified = now_secs();
    store.members.insert(slot, member);
    Ok(ok_json(true))
}

async fn delete_member(db: &Db, body: &str) -> Result<Response, Response> {
    let request: DeleteRequest = parse(body)?;
    let mut store = db.write().await;
    let slot = key(&request.partition_key, &request.range_key);
    if request.is_hard_delete {
        return match store.members.remove(&slot) {
            Some(_) => Ok(ok_json(true)),
            None => Err(err(StatusCode::NOT_FOUND, "Team member not found")),
        };
    }
    match store.members.get_mut(&slot) {
        Some(member) => {
            member.status = "DELETED".to_string();
            member.modified = now_secs();
            Ok(ok_json(true))
        }
        None => Err(err(StatusCode::NOT_FOUND, "Team member not found")),
    }
}

// ---------------------------------------------------------------------------
// Watchers
// ---------------------------------------------------------------------------

async fn add_watcher(db: &Db, body: &str) -> Result<Response, Response> {
    let request: WatchAddRequest = parse(body)?;
    let mut store = db.write().await;
    let ticket = store
        .tickets
        .get(&key(&request.ticket_partition_key, &request.ticket_range_key))
        .cloned()
        .ok_or_else(|| err(StatusCode::NOT_FOUND, "Ticket not found"))?;
    let now = now_secs();
    let watch = TicketWatch {
        partition_key: request.user_id,
        range_key: format!(
            "{}_{}",
            request.ticket_partition_key, request.ticket_range_key
        ),
        role: request.role,
        ticket_title: ticket.title,
        ticket_status: ticket.status,
        last_updated: now.clone(),
        unread_updates: 0,
        watching_since: now.clone(),
        created: now.clone(),
        modified: now,
    };
    store
        .watches
        .insert(key(&watch.partition_key, &watch.range_key), watch.clone());
    Ok(ok_json(watch))
}

async fn remove_watcher(db: &Db, body: &str) -> Result<Response, Response> {
    let request: WatchRemoveRequest = parse(body)?;
    let mut store = db.write().await;
    match store
        .watches
        .remove(&key(&request.partition_key, &request.range_key))
    {
        Some(_) => Ok(ok_json(true)),
        None => Err(err(StatusCode::NOT_FOUND, "Watch entry not found")),
    }
}

async fn mark_as_read(db: &Db, body: &str) -> Result<Response, Response> {
    let request: WatchMarkReadRequest = parse(body)?;
    let mut store = db.write().await;
    let slot = key(
        &request.user_id,
        &format!(
            "{}_{}",
            request.ticket_partition_key, request.ticket_range_key
        ),
    );
    match store.watches.get_mut(&slot) {
        Some(watch) => {
            watch.unread_updates = 0;
            watch.modified = now_secs();
            Ok(ok_json(true))
        }
        None => Err(err(StatusCode::NOT_FOUND, "Watch entry not found")),
    }
}

/// The "ticket changed" broadcast: refreshes every watcher's snapshot and
/// bumps unread counters for everyone except the acting user.
async fn update_watch_entry(db: &Db, body: &str) -> Result<Response, Response> {
    let request: WatchUpdateRequest = parse(body)?;
    let range = format!(
        "{}_{}",
        request.ticket_partition_key, request.ticket_range_key
    );
    let now = now_secs();
    let mut store = db.write().await;
    for watch in store.watches.values_mut() {
        if watch.range_key != range {
            continue;
        }
        watch.ticket_title = request.ticket_title.clone();
        watch.ticket_status = request.ticket_status.clone();
        watch.last_updated = request.last_updated.clone();
        watch.modified = now.clone();
        if watch.partition_key != request.user_id {
            watch.unread_updates += 1;
        }
    }
    Ok(ok_json(true))
}

async fn user_watch_list(
    db: &Db,
    params: &HashMap<String, String>,
) -> Result<Response, Response> {
    let user_id = params
        .get("userId")
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Missing userId"))?;
    let store = db.read().await;
    let mut results: Vec<TicketWatch> = store
        .watches
        .values()
        .filter(|w| &w.partition_key == user_id)
        .cloned()
        .collect();
    results.sort_by(|a, b| a.range_key.cmp(&b.range_key));
    Ok(page(results))
}

async fn user_unread_list(
    db: &Db,
    params: &HashMap<String, String>,
) -> Result<Response, Response> {
    let user_id = params
        .get("userId")
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Missing userId"))?;
    let store = db.read().await;
    let mut results: Vec<TicketWatch> = store
        .watches
        .values()
        .filter(|w| &w.partition_key == user_id && w.unread_updates > 0)
        .cloned()
        .collect();
    results.sort_by(|a, b| a.range_key.cmp(&b.range_key));
    Ok(page(results))
}

async fn ticket_watchers(
    db: &Db,
    params: &HashMap<String, String>,
) -> Result<Response, Response> {
    let ticket_pk = params
        .get("ticketPK")
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Missing ticketPK"))?;
    let ticket_rk = params
        .get("ticketRK")
        .ok_or_else(|| err(StatusCode::BAD_REQUEST, "Missing ticketRK"))?;
    let range = format!("{ticket_pk}_{ticket_rk}");
    let store = db.read().await;
    let mut results: Vec<TicketWatch> = store
        .watches
        .values()
        .filter(|w| w.range_key == range)
        .cloned()
        .collect();
    results.sort_by(|a, b| a.partition_key.cmp(&b.partition_key));
    Ok(page(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obfuscate_email_keeps_first_char_and_domain() {
        assert_eq!(obfuscate_email("jane@example.com"), "j***@example.com");
        assert_eq!(obfuscate_email("@example.com"), "***@example.com");
        assert_eq!(obfuscate_email("not-an-email"), "***");
    }

    #[test]
    fn error_body_uses_the_structured_shape() {
        let body = serde_json::to_value(ErrorBody {
            status_code: 404,
            message: "Ticket not found".to_string(),
        })
        .unwrap();
        assert_eq!(body["status_code"], 404);
        assert_eq!(body["message"], "Ticket not found");
    }

    #[test]
    fn page_serializes_null_cursors() {
        let body = serde_json::to_value(PageBody::<Ticket> {
            results: Vec::new(),
            last_partition_key: None,
            last_range_key: None,
        })
        .unwrap();
        assert!(body["last_partition_key"].is_null());
        assert!(body["last_range_key"].is_null());
        assert!(body["results"].as_array().unwrap().is_empty());
    }

    #[test]
    fn fetch_all_request_tolerates_missing_cursor() {
        let request: TicketFetchAllRequest =
            serde_json::from_str(r#"{"client_id":"c1","team_id":"t1","user_id":"u1"}"#).unwrap();
        assert_eq!(request.client_id, "c1");
        assert_eq!(request.team_id, "t1");
    }

    #[test]
    fn watch_request_shapes_roundtrip() {
        let request: WatchAddRequest = serde_json::from_str(
            r#"{"user_id":"u1","ticket_partition_key":"c1_t1","ticket_range_key":"r1","role":"OWNER"}"#,
        )
        .unwrap();
        assert_eq!(request.user_id, "u1");
        assert_eq!(request.role, "OWNER");
    }
}
