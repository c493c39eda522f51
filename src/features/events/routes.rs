use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::events::handlers;
use crate::features::events::services::EventService;

/// Create routes for the events feature
pub fn routes(service: Arc<EventService>) -> Router {
    Router::new()
        .route("/api/v2/public/events", get(handlers::list_events))
        .route("/api/v2/public/event/{event_name}", get(handlers::get_event))
        .route(
            "/api/v2/public/event/{event_name}/languages",
            get(handlers::get_languages),
        )
        .route(
            "/api/v2/public/event/{event_name}/calendar/{locale}",
            get(handlers::get_calendar),
        )
        .with_state(service)
}
