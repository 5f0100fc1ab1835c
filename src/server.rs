//! Live HTTP server
//!
//! Every request re-reads the session files and renders a fresh page, so a
//! browser left open follows a conversation as it is written. Pages reload
//! themselves through refresh metadata.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;

use crate::config::Config;
use crate::error::{Result, ViewerError};
use crate::render::{
    html_escape, render_index, render_not_found, render_session, render_status_page, PageOptions,
};
use crate::session::{SessionFilter, SessionIndex};

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    fn index_options(&self) -> PageOptions {
        PageOptions::live(self.config.refresh.index_seconds, self.config.render.clone())
    }

    fn session_options(&self) -> PageOptions {
        PageOptions::live(self.config.refresh.session_seconds, self.config.render.clone())
    }

    fn session_index(&self) -> SessionIndex {
        SessionIndex::new(&self.config.claude_dir)
            .with_preview_chars(self.config.render.preview_max_chars)
    }
}

/// Bind `server.host:port` and serve until Ctrl-C
///
/// # Arguments
///
/// * `config` - Validated configuration
/// * `open_browser` - Launch the default browser once the socket is bound
///
/// # Errors
///
/// Returns error if the address cannot be bound or the server fails
pub async fn run_server(config: Config, open_browser: bool) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.port;

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    let url = format!("http://{}:{}", host, port);
    tracing::info!("Live server listening on {}", url);

    if open_browser {
        if let Err(e) = crate::generator::open_url(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let app = create_router(AppState::new(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
    }
    tracing::info!("Shutting down");
}

/// Routes for the live viewer
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/session/:id", get(session_handler))
        .route("/favicon.ico", get(favicon_handler))
        .fallback(fallback_handler)
        .with_state(state)
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    tracing::info!("GET /");
    let options = state.index_options();
    let page_options = options.clone();

    let rendered = tokio::task::spawn_blocking(move || -> Result<(StatusCode, String)> {
        let entries = state
            .session_index()
            .build(&SessionFilter::default().with_limit(state.config.limit))?;
        Ok((
            StatusCode::OK,
            render_index(&entries, &page_options, Utc::now()),
        ))
    })
    .await;

    respond(rendered, &options)
}

async fn session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let id = id.strip_suffix(".html").unwrap_or(&id).to_string();
    tracing::info!("GET /session/{}", id);
    let options = state.session_options();
    let page_options = options.clone();

    let rendered = tokio::task::spawn_blocking(move || -> Result<(StatusCode, String)> {
        match state.session_index().find(&id)? {
            Some(session) => Ok((StatusCode::OK, render_session(&session, &page_options))),
            None => {
                tracing::debug!("No session matching {}", id);
                Ok((StatusCode::NOT_FOUND, render_not_found(&id, &page_options)))
            }
        }
    })
    .await;

    respond(rendered, &options)
}

async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fallback_handler() -> Response {
    html_response(
        StatusCode::NOT_FOUND,
        render_status_page(
            "Page not found",
            "Nothing lives at this address.",
            &PageOptions::live(0, Default::default()),
        ),
    )
}

type Rendered = std::result::Result<Result<(StatusCode, String)>, tokio::task::JoinError>;

fn respond(rendered: Rendered, options: &PageOptions) -> Response {
    match rendered {
        Ok(Ok((status, body))) => html_response(status, body),
        Ok(Err(err)) => error_response(&err, options),
        Err(join_err) => {
            tracing::error!("Render task failed: {}", join_err);
            html_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                render_status_page("Server error", "Rendering failed.", options),
            )
        }
    }
}

fn error_response(err: &anyhow::Error, options: &PageOptions) -> Response {
    match err.downcast_ref::<ViewerError>() {
        Some(ViewerError::NotFound(what)) => {
            tracing::warn!("Not found: {}", what);
            html_response(
                StatusCode::NOT_FOUND,
                render_status_page(
                    "Not found",
                    &format!("Missing: <code>{}</code>", html_escape(what)),
                    options,
                ),
            )
        }
        Some(ViewerError::AccessDenied(what)) => {
            tracing::warn!("Access denied: {}", what);
            html_response(
                StatusCode::FORBIDDEN,
                render_status_page(
                    "Access denied",
                    &format!("Cannot read <code>{}</code>.", html_escape(what)),
                    options,
                ),
            )
        }
        _ => {
            tracing::error!("Request failed: {}", err);
            html_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                render_status_page("Server error", &html_escape(&err.to_string()), options),
            )
        }
    }
}

fn html_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, HTML_CONTENT_TYPE),
            (header::CACHE_CONTROL, NO_CACHE),
        ],
        body,
    )
        .into_response()
}
