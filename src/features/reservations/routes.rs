use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::reservations::handlers;
use crate::features::reservations::services::ReservationService;

/// Create routes for the reservations feature
pub fn routes(service: Arc<ReservationService>) -> Router {
    Router::new()
        .route(
            "/api/v2/public/event/{event_name}/reserve-tickets",
            post(handlers::reserve_tickets),
        )
        .with_state(service)
}
