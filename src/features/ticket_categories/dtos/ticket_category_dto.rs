use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::ticket_categories::models::{
    AdditionalServiceType, SaleableAdditionalService, SaleableTicketCategory, SupplementPolicy,
};
use crate::shared::formatters::formatted_dates;
use crate::shared::i18n::{DateFormat, SupportedLanguage};

/// A ticket category offered on the event page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketCategoryDto {
    pub id: i32,
    pub name: String,
    /// Rendered Markdown, keyed by language code
    pub description: HashMap<String, String>,
    pub bounded: bool,
    pub access_restricted: bool,
    pub max_tickets: i32,
    pub free: bool,
    pub formatted_final_price: String,
    pub has_discount: bool,
    pub formatted_discounted_price: String,
    pub expired: bool,
    pub sale_in_future: bool,
    pub sold_out: bool,
    pub saleable: bool,
    pub formatted_inception: HashMap<String, String>,
    pub formatted_expiration: HashMap<String, String>,
}

impl TicketCategoryDto {
    pub fn new(
        stc: &SaleableTicketCategory,
        description: HashMap<String, String>,
        languages: &[&SupportedLanguage],
        zone: chrono_tz::Tz,
    ) -> Self {
        let category = &stc.category;
        Self {
            id: category.id,
            name: category.name.clone(),
            description,
            bounded: category.bounded,
            access_restricted: category.access_restricted,
            max_tickets: stc.selectable_amount(),
            free: category.is_free(),
            formatted_final_price: stc.formatted_final_price(),
            has_discount: stc.discount.is_some(),
            formatted_discounted_price: stc.formatted_discounted_price(),
            expired: stc.expired,
            sale_in_future: stc.sale_in_future,
            sold_out: stc.sold_out,
            saleable: stc.is_saleable(),
            formatted_inception: formatted_dates(
                languages,
                category.inception,
                zone,
                DateFormat::TicketCategoryDate,
            ),
            formatted_expiration: formatted_dates(
                languages,
                category.expiration,
                zone,
                DateFormat::TicketCategoryDate,
            ),
        }
    }
}

/// A donation or supplement offered alongside tickets
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalServiceDto {
    pub id: i32,
    #[serde(rename = "type")]
    pub service_type: AdditionalServiceType,
    pub supplement_policy: Option<SupplementPolicy>,
    pub fix_price: bool,
    pub available_quantity: i32,
    pub max_qty_per_order: i32,
    pub free: bool,
    pub formatted_price: String,
    pub has_discount: bool,
    pub formatted_discounted_price: String,
    pub vat_applies: bool,
    pub vat_included: bool,
    pub vat_percentage: Option<String>,
    pub expired: bool,
    pub sale_in_future: bool,
    pub formatted_inception: HashMap<String, String>,
    pub formatted_expiration: HashMap<String, String>,
    pub title: HashMap<String, String>,
    /// Rendered Markdown, keyed by language code
    pub description: HashMap<String, String>,
}

impl AdditionalServiceDto {
    pub fn new(
        sas: &SaleableAdditionalService,
        title: HashMap<String, String>,
        description: HashMap<String, String>,
        languages: &[&SupportedLanguage],
        zone: chrono_tz::Tz,
    ) -> Self {
        let service = &sas.service;
        Self {
            id: service.id,
            service_type: service.service_type,
            supplement_policy: service.supplement_policy,
            fix_price: service.fix_price,
            available_quantity: service.available_qty,
            max_qty_per_order: service.max_qty_per_order,
            free: sas.is_free(),
            formatted_price: sas.formatted_final_price(),
            has_discount: sas.supports_discount(),
            formatted_discounted_price: sas.formatted_discounted_price(),
            vat_applies: service.vat_applies,
            vat_included: sas.vat_included,
            vat_percentage: service.vat.map(|v| v.to_string()),
            expired: sas.expired,
            sale_in_future: sas.sale_in_future,
            formatted_inception: formatted_dates(
                languages,
                service.inception_ts,
                zone,
                DateFormat::TicketCategoryDate,
            ),
            formatted_expiration: formatted_dates(
                languages,
                service.expiration_ts,
                zone,
                DateFormat::TicketCategoryDate,
            ),
            title,
            description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketCategoryForWaitingListDto {
    pub id: i32,
    pub name: String,
}

impl From<&SaleableTicketCategory> for TicketCategoryForWaitingListDto {
    fn from(stc: &SaleableTicketCategory) -> Self {
        Self {
            id: stc.category.id,
            name: stc.category.name.clone(),
        }
    }
}

/// Everything the ticket selection step shows
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemsByCategoryDto {
    pub ticket_categories: Vec<TicketCategoryDto>,
    pub expired_categories: Vec<TicketCategoryDto>,
    pub additional_services: Vec<AdditionalServiceDto>,
    pub waiting_list: bool,
    pub pre_sales: bool,
    pub ticket_categories_for_waiting_list: Vec<TicketCategoryForWaitingListDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::shared::i18n::find_language;
    use crate::shared::test_helpers::{discount_code, sample_event, ticket_category};

    #[test]
    fn test_ticket_category_dto() {
        let category = ticket_category(4, false);
        let now = category.inception + Duration::days(1);
        let event = sample_event();
        let stc = SaleableTicketCategory::new(
            category,
            now,
            &event,
            3,
            5,
            Some(discount_code("SAVE10")),
        );
        let languages: Vec<_> = find_language("en").into_iter().collect();

        let dto = TicketCategoryDto::new(&stc, HashMap::new(), &languages, event.zone());

        assert_eq!(dto.id, 4);
        assert_eq!(dto.max_tickets, 3);
        assert!(dto.has_discount);
        assert_eq!(dto.formatted_final_price, "100.00");
        assert_eq!(dto.formatted_discounted_price, "90.00");
        assert!(dto.saleable);
        assert!(dto.formatted_inception.contains_key("en"));

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["formattedFinalPrice"], "100.00");
        assert_eq!(json["accessRestricted"], false);
    }
}
