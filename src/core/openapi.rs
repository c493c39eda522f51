use utoipa::{Modify, OpenApi};

use crate::features::events::{dtos as events_dtos, handlers as events_handlers};
use crate::features::payments::{dtos as payments_dtos, models as payments_models};
use crate::features::promo_codes::{dtos as promo_codes_dtos, handlers as promo_codes_handlers};
use crate::features::reservations::{dtos as reservations_dtos, handlers as reservations_handlers};
use crate::features::ticket_categories::{
    dtos as ticket_categories_dtos, handlers as ticket_categories_handlers,
    models as ticket_categories_models,
};
use crate::features::waiting_list::{dtos as waiting_list_dtos, handlers as waiting_list_handlers};
use crate::shared::types::{ApiResponse, ErrorDescriptor, Meta, ValidatedResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Events
        events_handlers::list_events,
        events_handlers::get_event,
        events_handlers::get_languages,
        events_handlers::get_calendar,
        // Promo codes
        promo_codes_handlers::validate_code,
        // Ticket categories
        ticket_categories_handlers::list_ticket_categories,
        // Reservations
        reservations_handlers::reserve_tickets,
        // Waiting list
        waiting_list_handlers::subscribe,
    ),
    components(
        schemas(
            Meta,
            ErrorDescriptor,
            ApiResponse<Vec<String>>,
            // Events
            events_dtos::BasicEventInfoDto,
            events_dtos::EventDetailDto,
            events_dtos::FormattedEventDatesDto,
            events_dtos::OrganizationDto,
            events_dtos::InvoicingConfigurationDto,
            events_dtos::CaptchaConfigurationDto,
            events_dtos::AssignmentConfigurationDto,
            events_dtos::PromotionsConfigurationDto,
            ApiResponse<Vec<events_dtos::BasicEventInfoDto>>,
            ApiResponse<events_dtos::EventDetailDto>,
            // Payments
            payments_models::PaymentMethod,
            payments_models::PaymentProxy,
            payments_dtos::PaymentProxyWithParametersDto,
            // Promo codes
            promo_codes_dtos::EventCodeType,
            promo_codes_dtos::EventCodeDto,
            ValidatedResponse<promo_codes_dtos::EventCodeDto>,
            // Ticket categories
            ticket_categories_models::AdditionalServiceType,
            ticket_categories_models::SupplementPolicy,
            ticket_categories_dtos::TicketCategoryDto,
            ticket_categories_dtos::AdditionalServiceDto,
            ticket_categories_dtos::TicketCategoryForWaitingListDto,
            ticket_categories_dtos::ItemsByCategoryDto,
            ApiResponse<ticket_categories_dtos::ItemsByCategoryDto>,
            // Reservations
            reservations_dtos::TicketReservationDto,
            reservations_dtos::AdditionalServiceReservationDto,
            reservations_dtos::ReservationFormDto,
            ValidatedResponse<String>,
            // Waiting list
            waiting_list_dtos::WaitingQueueSubscriptionDto,
            ValidatedResponse<bool>,
        )
    ),
    tags(
        (name = "events", description = "Public event listing, details and calendar exports"),
        (name = "promo-codes", description = "Promo code and access code validation"),
        (name = "ticket-categories", description = "Ticket categories and additional services on sale"),
        (name = "reservations", description = "Ticket reservation"),
        (name = "waiting-list", description = "Waiting list and pre-registration"),
    ),
    info(
        title = "Ticketing API",
        version = "0.1.0",
        description = "Public API of the event ticketing service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_public_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v2/public/events",
            "/api/v2/public/event/{event_name}",
            "/api/v2/public/event/{event_name}/ticket-categories",
            "/api/v2/public/event/{event_name}/reserve-tickets",
            "/api/v2/public/event/{event_name}/waiting-list/subscribe",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {}",
                expected
            );
        }
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Tickets".to_string(),
            version: "2.0.0".to_string(),
            description: "Staging".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Tickets");
        assert_eq!(doc.info.description.as_deref(), Some("Staging"));
    }
}
