use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, TeamMember, Ticket, TicketWatch};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header("x-api-key", "test-key")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-api-key", "test-key")
        .body(String::new())
        .unwrap()
}

const CREATE_TICKET: &str = r#"{"client_id":"c1","team_range_key":"t1","title":"Outage",
    "description":"prod is down","files":"","severity":3,"user_id":"u1","status":"OPEN"}"#;

// --- routing and error shape ---

#[tokio::test]
async fn missing_api_key_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/?controller=tickets&action=create")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(CREATE_TICKET.to_string())
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status_code"], 403);
    assert_eq!(body["message"], "Missing api key");
}

#[tokio::test]
async fn unknown_action_is_a_structured_404() {
    let app = app();
    let resp = app
        .oneshot(post("/?controller=tickets&action=explode", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status_code"], 404);
    assert_eq!(body["message"], "Unknown controller or action");
}

#[tokio::test]
async fn malformed_body_is_a_structured_400() {
    let app = app();
    let resp = app
        .oneshot(post("/?controller=tickets&action=create", "not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status_code"], 400);
    assert_eq!(body["message"], "Invalid request body");
}

// --- tickets ---

#[tokio::test]
async fn create_ticket_returns_the_stored_record() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(post("/?controller=tickets&action=create", CREATE_TICKET))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let ticket: Ticket = body_json(resp).await;
    assert_eq!(ticket.partition_key, "c1_t1");
    assert!(!ticket.range_key.is_empty());
    assert_eq!(ticket.title, "Outage");
    assert_eq!(ticket.severity, 3);
    assert_eq!(ticket.status, "OPEN");

    let fetch = format!(
        r#"{{"partition_key":"{}","range_key":"{}","user_id":""}}"#,
        ticket.partition_key, ticket.range_key
    );
    let resp = app
        .oneshot(post("/?controller=tickets&action=fetch", &fetch))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Ticket = body_json(resp).await;
    assert_eq!(fetched.range_key, ticket.range_key);
}

#[tokio::test]
async fn fetch_missing_ticket_is_a_structured_404() {
    let app = app();
    let resp = app
        .oneshot(post(
            "/?controller=tickets&action=fetch",
            r#"{"partition_key":"c1_t1","range_key":"missing","user_id":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status_code"], 404);
    assert_eq!(body["message"], "Ticket not found");
}

#[tokio::test]
async fn soft_delete_marks_the_ticket_deleted() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(post("/?controller=tickets&action=create", CREATE_TICKET))
        .await
        .unwrap();
    let ticket: Ticket = body_json(resp).await;

    let delete = format!(
        r#"{{"partition_key":"{}","range_key":"{}","is_hard_delete":false,"user_id":"u1"}}"#,
        ticket.partition_key, ticket.range_key
    );
    let resp = app
        .clone()
        .oneshot(post("/?controller=tickets&action=delete", &delete))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let fetch = format!(
        r#"{{"partition_key":"{}","range_key":"{}","user_id":""}}"#,
        ticket.partition_key, ticket.range_key
    );
    let resp = app
        .oneshot(post("/?controller=tickets&action=fetch", &fetch))
        .await
        .unwrap();
    let fetched: Ticket = body_json(resp).await;
    assert_eq!(fetched.status, "DELETED");
}

// --- team members ---

#[tokio::test]
async fn member_create_obfuscates_the_email() {
    let app = app();
    let resp = app
        .oneshot(post(
            "/?controller=teammembers&action=create",
            r#"{"client_id":"c1","ticket_team_id":"t1","title":"Engineer","description":"",
                "email":"jane@example.com","requester_user_id":"u-admin","user_id":"u-jane",
                "status":"ACTIVE","level":2}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let member: TeamMember = body_json(resp).await;
    assert_eq!(member.partition_key, "c1_t1");
    assert_eq!(member.obfuscated_email, "j***@example.com");
    assert_eq!(member.level, 2);
    assert_eq!(member.assigned_tickets, 0);
}

// --- watchers ---

#[tokio::test]
async fn add_watcher_requires_an_existing_ticket() {
    let app = app();
    let resp = app
        .oneshot(post(
            "/?controller=watchers&action=addWatcher",
            r#"{"user_id":"u3","ticket_partition_key":"c1_t1","ticket_range_key":"missing","role":"OBSERVER"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Ticket not found");
}

#[tokio::test]
async fn watch_update_bumps_unread_for_other_users_only() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(post("/?controller=tickets&action=create", CREATE_TICKET))
        .await
        .unwrap();
    let ticket: Ticket = body_json(resp).await;

    for user in ["u3", "u1"] {
        let add = format!(
            r#"{{"user_id":"{user}","ticket_partition_key":"{}","ticket_range_key":"{}","role":"OBSERVER"}}"#,
            ticket.partition_key, ticket.range_key
        );
        let resp = app
            .clone()
            .oneshot(post("/?controller=watchers&action=addWatcher", &add))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // u1 updates the ticket snapshot; only u3 should gain an unread entry.
    let update = format!(
        r#"{{"user_id":"u1","ticket_partition_key":"{}","ticket_range_key":"{}",
            "ticket_title":"Outage (mitigated)","ticket_status":"IN_PROGRESS","last_updated":"later"}}"#,
        ticket.partition_key, ticket.range_key
    );
    let resp = app
        .clone()
        .oneshot(post("/?controller=watchers&action=updateWatchEntry", &update))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(get(
            "/?controller=watchers&action=getUserUnreadList&userId=u3",
        ))
        .await
        .unwrap();
    let body: serde_json::Value = body_json(resp).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["unread_updates"], 1);
    assert_eq!(results[0]["ticket_title"], "Outage (mitigated)");

    let resp = app
        .clone()
        .oneshot(get(
            "/?controller=watchers&action=getUserUnreadList&userId=u1",
        ))
        .await
        .unwrap();
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["results"].as_array().unwrap().is_empty());

    // Mark read and confirm the unread list drains.
    let mark = format!(
        r#"{{"user_id":"u3","ticket_partition_key":"{}","ticket_range_key":"{}"}}"#,
        ticket.partition_key, ticket.range_key
    );
    let resp = app
        .clone()
        .oneshot(post("/?controller=watchers&action=markAsRead", &mark))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(get(
            "/?controller=watchers&action=getUserUnreadList&userId=u3",
        ))
        .await
        .unwrap();
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["results"].as_array().unwrap().is_empty());

    // The reverse lookup sees both watchers, keyed by the ticket's pair.
    let uri = format!(
        "/?controller=watchers&action=getTicketWatchers&ticketPK={}&ticketRK={}&userId=u1",
        ticket.partition_key, ticket.range_key
    );
    let resp = app.oneshot(get(&uri)).await.unwrap();
    let watchers: serde_json::Value = body_json(resp).await;
    let results: Vec<TicketWatch> =
        serde_json::from_value(watchers["results"].clone()).unwrap();
    assert_eq!(results.len(), 2);
    for watch in &results {
        assert_eq!(
            watch.range_key,
            format!("{}_{}", ticket.partition_key, ticket.range_key)
        );
    }
}
