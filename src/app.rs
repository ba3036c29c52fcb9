use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Inline base64 images ride inside the JSON bodies.
const BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/events",
            get(handlers::list_events).post(handlers::create_event),
        )
        .route(
            "/events/:id",
            put(handlers::update_event).delete(handlers::delete_event),
        )
        .route("/events/:id/volunteers", post(handlers::enroll_volunteer))
        .route(
            "/trainings",
            get(handlers::list_trainings).post(handlers::create_training),
        )
        .route(
            "/trainings/:id",
            put(handlers::update_training).delete(handlers::delete_training),
        )
        .route(
            "/trainings/:id/participants",
            post(handlers::enroll_participant),
        )
        .route("/admin/login", post(handlers::login))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
