use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::ticket_categories::handlers;
use crate::features::ticket_categories::services::TicketCategoryService;

/// Create routes for the ticket categories feature
pub fn routes(service: Arc<TicketCategoryService>) -> Router {
    Router::new()
        .route(
            "/api/v2/public/event/{event_name}/ticket-categories",
            get(handlers::list_ticket_categories),
        )
        .with_state(service)
}
