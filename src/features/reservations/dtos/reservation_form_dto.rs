use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketReservationDto {
    pub ticket_category_id: Option<i32>,
    pub amount: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalServiceReservationDto {
    pub additional_service_id: Option<i32>,
    pub quantity: Option<i32>,
}

/// Ticket selection submitted by a buyer
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationFormDto {
    pub promo_code: Option<String>,
    pub reservation: Vec<TicketReservationDto>,
    pub additional_service: Vec<AdditionalServiceReservationDto>,
    /// reCAPTCHA response token
    pub captcha: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let form: ReservationFormDto =
            serde_json::from_str(r#"{"reservation":[{"ticketCategoryId":1,"amount":2}]}"#).unwrap();

        assert_eq!(form.reservation.len(), 1);
        assert_eq!(form.reservation[0].ticket_category_id, Some(1));
        assert!(form.additional_service.is_empty());
        assert!(form.promo_code.is_none());
    }
}
