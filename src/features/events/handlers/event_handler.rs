use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::core::error::Result;
use crate::features::events::dtos::{BasicEventInfoDto, EventDetailDto};
use crate::features::events::services::EventService;
use crate::shared::types::ApiResponse;

/// List published events
#[utoipa::path(
    get,
    path = "/api/v2/public/events",
    responses(
        (status = 200, description = "Events on sale or upcoming", body = ApiResponse<Vec<BasicEventInfoDto>>),
    ),
    tag = "events"
)]
pub async fn list_events(
    State(service): State<Arc<EventService>>,
) -> Result<Json<ApiResponse<Vec<BasicEventInfoDto>>>> {
    let events = service.list_published().await?;
    Ok(Json(ApiResponse::success(Some(events), None, None)))
}

/// Get event details
#[utoipa::path(
    get,
    path = "/api/v2/public/event/{event_name}",
    params(
        ("event_name" = String, Path, description = "Event short name")
    ),
    responses(
        (status = 200, description = "Event found", body = ApiResponse<EventDetailDto>),
        (status = 404, description = "Event not found or disabled")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(service): State<Arc<EventService>>,
    Path(event_name): Path<String>,
) -> Result<Json<ApiResponse<EventDetailDto>>> {
    let event = service.get_detail(&event_name).await?;
    Ok(Json(ApiResponse::success(Some(event), None, None)))
}

/// Get the content languages of an event
#[utoipa::path(
    get,
    path = "/api/v2/public/event/{event_name}/languages",
    params(
        ("event_name" = String, Path, description = "Event short name")
    ),
    responses(
        (status = 200, description = "Language codes", body = ApiResponse<Vec<String>>),
        (status = 404, description = "Event not found or without languages")
    ),
    tag = "events"
)]
pub async fn get_languages(
    State(service): State<Arc<EventService>>,
    Path(event_name): Path<String>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let languages = service.get_languages(&event_name).await?;
    Ok(Json(ApiResponse::success(Some(languages), None, None)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    /// `google` redirects to Google Calendar, anything else downloads an ICS file
    #[serde(rename = "type")]
    pub calendar_type: Option<String>,
    /// Ticket whose category is named in the summary
    pub ticket_id: Option<String>,
}

/// Export an event to a calendar
#[utoipa::path(
    get,
    path = "/api/v2/public/event/{event_name}/calendar/{locale}",
    params(
        ("event_name" = String, Path, description = "Event short name"),
        ("locale" = String, Path, description = "Language of the description"),
        CalendarQuery
    ),
    responses(
        (status = 200, description = "iCalendar file", content_type = "text/calendar"),
        (status = 302, description = "Redirect to Google Calendar"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_calendar(
    State(service): State<Arc<EventService>>,
    Path((event_name, locale)): Path<(String, String)>,
    Query(query): Query<CalendarQuery>,
) -> Result<Response> {
    let entry = service
        .get_calendar_entry(&event_name, &locale, query.ticket_id.as_deref())
        .await?;

    if query.calendar_type.as_deref() == Some("google") {
        return Ok((
            StatusCode::FOUND,
            [(header::LOCATION, entry.google_calendar_url())],
        )
            .into_response());
    }

    let ics = entry.to_ics(service.now())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"calendar.ics\""),
        ],
        ics,
    )
        .into_response())
}
