use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::core::error::{AppError, Result};
use crate::features::promo_codes::dtos::EventCodeDto;
use crate::features::promo_codes::services::PromoCodeService;
use crate::shared::constants::STEP_1_CODE_NOT_FOUND;
use crate::shared::types::{ErrorDescriptor, ValidatedResponse};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ValidateCodeQuery {
    /// Code typed by the buyer
    pub code: String,
}

/// Validate a promo or special price code for an event
///
/// A blank code resolves to nothing and is reported as not found.
#[utoipa::path(
    get,
    path = "/api/v2/public/event/{event_name}/validate-code",
    params(
        ("event_name" = String, Path, description = "Event short name"),
        ValidateCodeQuery
    ),
    responses(
        (status = 200, description = "Code is valid", body = ValidatedResponse<EventCodeDto>),
        (status = 422, description = "Code not found or no longer valid", body = ValidatedResponse<EventCodeDto>),
        (status = 404, description = "Event not found")
    ),
    tag = "promo-codes"
)]
pub async fn validate_code(
    State(service): State<Arc<PromoCodeService>>,
    Path(event_name): Path<String>,
    Query(query): Query<ValidateCodeQuery>,
) -> Result<(StatusCode, Json<ValidatedResponse<EventCodeDto>>)> {
    let event = service
        .find_event_scope(&event_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event '{}' not found", event_name)))?;

    let code = query.code.trim();
    let check = service.resolve_code(&event, Some(code)).await?;

    if let Some(dto) = EventCodeDto::from_resolved(code, check.code()) {
        return Ok((StatusCode::OK, Json(ValidatedResponse::ok(dto))));
    }

    let error = ErrorDescriptor::new("promoCode", STEP_1_CODE_NOT_FOUND);
    Ok((
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ValidatedResponse::failed(
            vec![error],
            Some(EventCodeDto::rejected(code)),
        )),
    ))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    use crate::features::promo_codes::models::SpecialPriceStatus;
    use crate::features::promo_codes::routes;
    use crate::features::promo_codes::services::PromoCodeService;
    use crate::shared::test_helpers::{
        discount_code, event_scope, special_price, FixedClock, InMemoryCodeRepository,
    };

    use super::*;

    fn server(repository: InMemoryCodeRepository) -> TestServer {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        let service = Arc::new(PromoCodeService::new(Arc::new(repository), Arc::new(clock)));
        TestServer::new(routes::routes(service)).unwrap()
    }

    fn repository() -> InMemoryCodeRepository {
        InMemoryCodeRepository::default()
            .with_event("summit", event_scope())
            .with_discount(discount_code("SAVE10"))
            .with_special_price(special_price("SP-1", 7, SpecialPriceStatus::Free))
            .with_active_category(7, 1)
    }

    #[tokio::test]
    async fn test_valid_discount_code() {
        let server = server(repository());

        let response = server
            .get("/api/v2/public/event/summit/validate-code")
            .add_query_param("code", "SAVE10")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["value"]["code"], "SAVE10");
        assert_eq!(body["value"]["type"], "DISCOUNT");
        assert_eq!(body["value"]["discountAmount"], "10");
    }

    #[tokio::test]
    async fn test_valid_special_price() {
        let server = server(repository());

        let response = server
            .get("/api/v2/public/event/summit/validate-code")
            .add_query_param("code", "SP-1")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["value"]["type"], "SPECIAL_PRICE");
        assert_eq!(body["value"]["discountType"], "NONE");
        assert_eq!(body["value"]["discountAmount"], Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_code_is_unprocessable() {
        let server = server(repository());

        let response = server
            .get("/api/v2/public/event/summit/validate-code")
            .add_query_param("code", "NOPE")
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["errorCount"], 1);
        assert_eq!(body["validationErrors"][0]["fieldName"], "promoCode");
        assert_eq!(body["validationErrors"][0]["code"], STEP_1_CODE_NOT_FOUND);
        assert_eq!(body["value"]["code"], "NOPE");
        assert_eq!(body["value"]["type"], Value::Null);
    }

    #[tokio::test]
    async fn test_blank_code_is_unprocessable() {
        let server = server(repository());

        let response = server
            .get("/api/v2/public/event/summit/validate-code")
            .add_query_param("code", "  ")
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_found() {
        let server = server(repository());

        let response = server
            .get("/api/v2/public/event/missing/validate-code")
            .add_query_param("code", "SAVE10")
            .await;

        response.assert_status_not_found();
    }
}
