//! HTTP API surface
//!
//! Thin axum handlers over the core operations. Every endpoint except the
//! identity webhook and signed blob reads requires a bearer session token;
//! errors always surface as a JSON envelope `{"error": string}`.

mod auth;
mod blobs;
mod error;
mod files;
mod flashcards;
mod folders;
mod notes;
mod users;
mod views;
mod whiteboards;

pub use auth::issue_token;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use studydeck_core::Core;
use tower_http::cors::{Any, CorsLayer};

pub type AppState = Arc<Core>;

/// Build the full application router
pub fn router(core: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_origin(Any);

    let upload_limit = core.config.limits.max_upload_bytes as usize;

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/folders", get(folders::list).post(folders::create))
        .route(
            "/folders/:id",
            get(folders::get_one)
                .patch(folders::rename)
                .delete(folders::delete),
        )
        .route("/notes", get(notes::list).post(notes::create))
        .route(
            "/notes/:id",
            get(notes::get_one)
                .patch(notes::update)
                .delete(notes::delete),
        )
        .route(
            "/whiteboards",
            get(whiteboards::list).post(whiteboards::create),
        )
        .route(
            "/whiteboards/:id",
            get(whiteboards::get_one)
                .patch(whiteboards::update)
                .delete(whiteboards::delete),
        )
        .route(
            "/files",
            get(files::list)
                .post(files::upload)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/files/:id",
            get(files::get_one)
                .patch(files::rename)
                .delete(files::delete),
        )
        .route("/flashcards", get(flashcards::list_groups))
        .route("/flashcards/generate", post(flashcards::generate))
        .route(
            "/flashcards/:group_id",
            get(flashcards::get_group)
                .patch(flashcards::rename_group)
                .delete(flashcards::delete_group),
        )
        .route(
            "/flashcards/:group_id/flashcards/:id",
            patch(flashcards::update_card).delete(flashcards::delete_card),
        )
        .route("/users/clerk", post(users::webhook))
        .route("/blobs/*key", get(blobs::read))
        .layer(cors)
        .with_state(core)
}
