use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::promo_codes::handlers;
use crate::features::promo_codes::services::PromoCodeService;

/// Create routes for the promo codes feature
pub fn routes(service: Arc<PromoCodeService>) -> Router {
    Router::new()
        .route(
            "/api/v2/public/event/{event_name}/validate-code",
            get(handlers::validate_code),
        )
        .with_state(service)
}
