use axum::{extract::Request, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::tmdb::TmdbClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tmdb: TmdbClient,
}

impl AppState {
    pub fn new(config: Config, tmdb: TmdbClient) -> Self {
        Self {
            config: Arc::new(config),
            tmdb,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // The static "search" segment is registered alongside the :movie_id
    // matcher; axum prefers the static route, so "search" never binds as an
    // id.
    let api_routes = Router::new()
        .route("/api/movies", get(crate::api::list_popular))
        .route("/api/movies/search", get(crate::api::search))
        .route("/api/movies/:movie_id", get(crate::api::get_movie));

    let mut router = Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes)
        .fallback(fallback_handler);

    // The browser app (list and detail pages) is a static bundle served
    // next to the API when configured.
    if let Some(ref appdir) = state.config.appdir {
        router = router.fallback_service(ServeDir::new(appdir));
    }

    router
        .layer(axum::middleware::from_fn(crate::middleware::normalize_path))
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    // OPTIONS preflight must succeed even on unmatched paths.
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
