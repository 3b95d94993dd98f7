use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use mirror_config::PageRegistry;
use mirror_web::Scraper;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::render;

const NOT_FOUND_BODY: &str = "404 page not found";
const SCRAPE_FAILED_BODY: &str = "Failed to scrape content";

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<PageRegistry>,
    pub scraper: Arc<Scraper>,
}

impl AppState {
    pub fn new(registry: PageRegistry, scraper: Scraper) -> Self {
        Self {
            registry: Arc::new(registry),
            scraper: Arc::new(scraper),
        }
    }
}

/// `/` index, `/static/*` files from `static_dir`, `/{id}` mirrors.
pub fn router(state: AppState, static_dir: impl AsRef<std::path::Path>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/:id", get(mirror))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render::index_page(&state.registry))
}

async fn mirror(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(source) = state.registry.resolve(&id) else {
        return not_found().await.into_response();
    };

    match state.scraper.scrape(source).await {
        Ok(links) => Html(render::links_page(&id, &links)).into_response(),
        Err(err) => {
            tracing::error!(id = %id, source, error = %err, "mirror.scrape_failed");
            (StatusCode::INTERNAL_SERVER_ERROR, SCRAPE_FAILED_BODY).into_response()
        }
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// Serve until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Serve until ctrl-c.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    serve_with_shutdown(listener, app, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "ctrl_c handler unavailable");
            std::future::pending::<()>().await;
        }
        tracing::info!("mirror.shutdown");
    })
    .await
}
