//! Route definitions for the ImageVault HTTP API.
//!
//! All routes are organized by resource and mounted under `/api/v1`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.asset_store.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(folder_routes())
        .merge(image_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Folder CRUD and folder contents.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", get(handlers::folder::list_folders))
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}", put(handlers::folder::update_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route(
            "/folders/{id}/images",
            get(handlers::folder::list_folder_images),
        )
}

/// Image browsing, upload, search, and mutation.
fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/images", get(handlers::image::list_recent))
        .route("/images", post(handlers::image::upload_image))
        .route("/images/search", get(handlers::image::search_images))
        .route("/images/{id}", get(handlers::image::get_image))
        .route("/images/{id}", put(handlers::image::update_image))
        .route("/images/{id}", delete(handlers::image::delete_image))
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
