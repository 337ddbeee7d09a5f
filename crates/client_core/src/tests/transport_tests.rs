use super::*;
use axum::{http::StatusCode, routing::post, Json, Router};
use shared::{
    domain::{AgentId, PartNumber, ThreadId},
    protocol::{ResponseStatus, TalkPart},
};
use tokio::net::TcpListener;

async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn echo_query(Json(request): Json<QueryRequest>) -> Json<QueryResponse> {
    Json(QueryResponse {
        status: ResponseStatus::Success,
        text_response: Some(format!("echo: {}", request.query)),
        ..QueryResponse::default()
    })
}

async fn next_part(Json(request): Json<ContinueTalkRequest>) -> Json<ContinueTalkResponse> {
    Json(ContinueTalkResponse {
        status: ResponseStatus::Success,
        message: None,
        response: Some(TalkPart {
            response: format!("{} part {}", request.thread_id, request.part_number),
            completed: request.part_number >= PartNumber(3),
        }),
    })
}

fn talk_request(part: u32) -> ContinueTalkRequest {
    ContinueTalkRequest {
        thread_id: ThreadId::new("t1"),
        agent_id: AgentId::new("a1"),
        part_number: PartNumber(part),
    }
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let api = HttpConversationApi::new("http://localhost:3000/backend").expect("api");
    assert_eq!(
        api.endpoint(QUERY_ROUTE).expect("url").as_str(),
        "http://localhost:3000/backend/api/query"
    );

    let api = HttpConversationApi::new("http://localhost:3000").expect("api");
    assert_eq!(
        api.endpoint(CONTINUE_TALK_ROUTE).expect("url").as_str(),
        "http://localhost:3000/api/continue_talk"
    );
}

#[test]
fn rejects_unparseable_server_url() {
    let err = HttpConversationApi::new("not a url").expect_err("invalid");
    assert!(matches!(err, TransportError::InvalidUrl { .. }));
}

#[tokio::test]
async fn posts_both_endpoints_as_json() {
    let app = Router::new()
        .route(QUERY_ROUTE, post(echo_query))
        .route(CONTINUE_TALK_ROUTE, post(next_part));
    let api = HttpConversationApi::new(&spawn_backend(app).await).expect("api");

    let answer = api
        .query(&QueryRequest {
            query: "What is MSLearn?".into(),
        })
        .await
        .expect("query");
    assert!(answer.status.is_success());
    assert_eq!(answer.text_response.as_deref(), Some("echo: What is MSLearn?"));

    let part = api
        .continue_talk(&talk_request(2))
        .await
        .expect("continue")
        .response
        .expect("payload");
    assert_eq!(part.response, "t1 part 2");
    assert!(!part.completed);
}

#[tokio::test]
async fn error_status_with_envelope_is_an_application_reply() {
    let app = Router::new().route(
        QUERY_ROUTE,
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(QueryResponse::failure("Query is required")),
            )
        }),
    );
    let api = HttpConversationApi::new(&spawn_backend(app).await).expect("api");

    let reply = api
        .query(&QueryRequest { query: "x".into() })
        .await
        .expect("envelope decodes");
    assert_eq!(reply.status, ResponseStatus::Error);
    assert_eq!(reply.message.as_deref(), Some("Query is required"));
}

#[tokio::test]
async fn numeric_status_envelope_is_an_application_reply() {
    let app = Router::new().route(
        QUERY_ROUTE,
        post(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": 503, "message": "Rate limited" })),
            )
        }),
    );
    let api = HttpConversationApi::new(&spawn_backend(app).await).expect("api");

    let reply = api
        .query(&QueryRequest { query: "x".into() })
        .await
        .expect("envelope decodes");
    assert!(!reply.status.is_success());
    assert_eq!(reply.message.as_deref(), Some("Rate limited"));
}

#[tokio::test]
async fn non_json_body_is_a_decode_failure() {
    let app = Router::new().route(
        CONTINUE_TALK_ROUTE,
        post(|| async { (StatusCode::BAD_GATEWAY, "<html>upstream down</html>") }),
    );
    let api = HttpConversationApi::new(&spawn_backend(app).await).expect("api");

    let err = api
        .continue_talk(&talk_request(2))
        .await
        .expect_err("not json");
    assert!(matches!(err, TransportError::Decode { status: 502, .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_request_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = HttpConversationApi::new(&format!("http://{addr}")).expect("api");
    let err = api
        .query(&QueryRequest { query: "x".into() })
        .await
        .expect_err("refused");
    assert!(matches!(err, TransportError::Request { .. }));
}
