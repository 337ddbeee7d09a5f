use std::{io, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use page::PageConfig;
use shared::protocol::{
    ContinueTalkResponse, ErrorEnvelope, QueryResponse, CONTINUE_TALK_ROUTE, QUERY_ROUTE,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};
use tracing::{info, warn};

mod api;
mod app_state;
mod config;

use api::{ContinueTalkBody, QueryBody};
use app_state::AppState;
use config::load_settings;

const MAX_BODY_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorEnvelope>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let document = page::render_document(&PageConfig::new(
        settings.page_locale,
        settings.api_base.clone(),
    ))?;
    let state = AppState {
        page: Arc::from(document),
    };
    let app = build_router(Arc::new(state));

    let addr = resolve_bind_addr(&settings.bind_addr).await?;
    let listener = bind_with_fallback(addr, settings.port_attempts)
        .await
        .with_context(|| format!("failed to bind preview server near {addr}"))?;
    let local = listener.local_addr()?;
    info!(addr = %local, locale = %settings.page_locale, "preview server listening");
    info!("question page: http://{local}/index");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let api: Router<Arc<AppState>> = Router::new()
        .route(QUERY_ROUTE, post(http_query))
        .route(CONTINUE_TALK_ROUTE, post(http_continue_talk))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

    Router::new()
        .route("/", get(root_redirect))
        .route("/index", get(index_page))
        .route("/index.html", get(index_page))
        .route("/healthz", get(healthz))
        .merge(api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn root_redirect() -> Redirect {
    Redirect::to("/index")
}

async fn index_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.to_string())
}

async fn http_query(payload: Result<Json<QueryBody>, JsonRejection>) -> ApiResult<QueryResponse> {
    let Json(body) = payload.map_err(reject)?;
    let reply = api::answer_query(&body, Utc::now())
        .map_err(|envelope| (StatusCode::BAD_REQUEST, Json(envelope)))?;
    if let Some(talk) = &reply.talk_initial {
        info!(thread_id = %talk.thread_id, "mock query answered");
    }
    Ok(Json(reply))
}

async fn http_continue_talk(
    payload: Result<Json<ContinueTalkBody>, JsonRejection>,
) -> ApiResult<ContinueTalkResponse> {
    let Json(body) = payload.map_err(reject)?;
    let reply = api::continue_talk(&body)
        .map_err(|envelope| (StatusCode::BAD_REQUEST, Json(envelope)))?;
    info!(
        thread_id = body.thread_id.as_deref().unwrap_or_default(),
        part_number = body.part_number.unwrap_or_default(),
        completed = reply.response.as_ref().is_some_and(|part| part.completed),
        "mock conversation advanced"
    );
    Ok(Json(reply))
}

fn reject(rejection: JsonRejection) -> (StatusCode, Json<ErrorEnvelope>) {
    warn!(error = %rejection.body_text(), "rejected api request body");
    let status = match &rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            StatusCode::BAD_REQUEST
        }
        other => other.status(),
    };
    (
        status,
        Json(ErrorEnvelope::new(format!(
            "invalid request body: {}",
            rejection.body_text()
        ))),
    )
}

async fn resolve_bind_addr(raw: &str) -> anyhow::Result<SocketAddr> {
    if let Ok(addr) = raw.parse::<SocketAddr>() {
        return Ok(addr);
    }
    tokio::net::lookup_host(raw)
        .await
        .with_context(|| format!("failed to resolve bind address '{raw}'"))?
        .next()
        .with_context(|| format!("bind address '{raw}' resolved to nothing"))
}

/// Binds `addr`, moving to the next port while the current one is taken.
async fn bind_with_fallback(addr: SocketAddr, attempts: u16) -> io::Result<TcpListener> {
    let mut candidate = addr;
    let mut remaining = attempts.max(1);
    loop {
        match TcpListener::bind(candidate).await {
            Ok(listener) => return Ok(listener),
            Err(error)
                if error.kind() == io::ErrorKind::AddrInUse
                    && remaining > 1
                    && candidate.port() != 0
                    && candidate.port() < u16::MAX =>
            {
                let next = candidate.port() + 1;
                warn!(port = candidate.port(), next, "port is busy, trying next port");
                candidate.set_port(next);
                remaining -= 1;
            }
            Err(error) => return Err(error),
        }
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down preview server");
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
