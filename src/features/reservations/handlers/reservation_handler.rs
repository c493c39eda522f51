use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, ClientIp};
use crate::features::reservations::dtos::ReservationFormDto;
use crate::features::reservations::models::ReservationError;
use crate::features::reservations::services::{ReservationOutcome, ReservationService};
use crate::shared::types::ValidatedResponse;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReserveQuery {
    /// Language of the buyer, stored on the reservation
    pub lang: Option<String>,
}

/// Reserve tickets and additional services
#[utoipa::path(
    post,
    path = "/api/v2/public/event/{event_name}/reserve-tickets",
    params(
        ("event_name" = String, Path, description = "Event short name"),
        ReserveQuery
    ),
    request_body = ReservationFormDto,
    responses(
        (status = 200, description = "Reservation created, value is its id", body = ValidatedResponse<String>),
        (status = 422, description = "Selection refused", body = ValidatedResponse<String>),
        (status = 404, description = "Event not found or disabled")
    ),
    tag = "reservations"
)]
pub async fn reserve_tickets(
    State(service): State<Arc<ReservationService>>,
    Path(event_name): Path<String>,
    Query(query): Query<ReserveQuery>,
    ClientIp(client_ip): ClientIp,
    AppJson(form): AppJson<ReservationFormDto>,
) -> Result<(StatusCode, Json<ValidatedResponse<String>>)> {
    let outcome = service
        .reserve(
            &event_name,
            &form,
            query.lang.as_deref(),
            client_ip.as_deref(),
        )
        .await?;

    Ok(match outcome {
        ReservationOutcome::Created(id) => {
            (StatusCode::OK, Json(ValidatedResponse::ok(id.to_string())))
        }
        ReservationOutcome::Rejected(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidatedResponse::failed(
                errors.iter().map(ReservationError::descriptor).collect(),
                None,
            )),
        ),
    })
}
