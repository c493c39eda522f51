use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::waiting_list::dtos::WaitingQueueSubscriptionDto;
use crate::features::waiting_list::services::{SubscriptionOutcome, WaitingListService};
use crate::shared::types::ValidatedResponse;

/// Subscribe to the waiting list of an event
///
/// Subscribing again with the same email address succeeds with `false`.
#[utoipa::path(
    post,
    path = "/api/v2/public/event/{event_name}/waiting-list/subscribe",
    params(
        ("event_name" = String, Path, description = "Event short name")
    ),
    request_body = WaitingQueueSubscriptionDto,
    responses(
        (status = 200, description = "Whether a new subscription was added", body = ValidatedResponse<bool>),
        (status = 422, description = "Invalid subscription", body = ValidatedResponse<bool>),
        (status = 404, description = "Event not found")
    ),
    tag = "waiting-list"
)]
pub async fn subscribe(
    State(service): State<Arc<WaitingListService>>,
    Path(event_name): Path<String>,
    AppJson(dto): AppJson<WaitingQueueSubscriptionDto>,
) -> Result<(StatusCode, Json<ValidatedResponse<bool>>)> {
    Ok(match service.subscribe(&event_name, &dto).await? {
        SubscriptionOutcome::Subscribed(added) => {
            (StatusCode::OK, Json(ValidatedResponse::ok(added)))
        }
        SubscriptionOutcome::Rejected(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidatedResponse::failed(errors, None)),
        ),
    })
}
