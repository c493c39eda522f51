use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::waiting_list::handlers;
use crate::features::waiting_list::services::WaitingListService;

/// Create routes for the waiting list feature
pub fn routes(service: Arc<WaitingListService>) -> Router {
    Router::new()
        .route(
            "/api/v2/public/event/{event_name}/waiting-list/subscribe",
            post(handlers::subscribe),
        )
        .with_state(service)
}
