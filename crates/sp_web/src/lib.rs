use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/news/global/:symbol", get(handlers::global_news))
        .route("/news/korea/:name", get(handlers::korean_news))
        .route("/suggest/global", get(handlers::suggest_global))
        .route("/suggest/korea", get(handlers::suggest_korea))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(Arc::new(state))
}

/// Any origin when the list is empty or holds nothing parseable.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        if !allowed_origins.is_empty() {
            warn!("No valid CORS origins in {:?}, allowing any", allowed_origins);
        }
        AllowOrigin::any()
    } else {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers(tower_http::cors::Any)
}

pub async fn serve(state: AppState, addr: SocketAddr, allowed_origins: &[String]) -> std::io::Result<()> {
    let app = create_app(state, allowed_origins);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "🚀 Server listening");
    axum::serve(listener, app).await
}

pub mod prelude {
    pub use crate::{create_app, serve, ApiError, AppState};
    pub use sp_core::{Error, Result};
}
