use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::events::dtos::{
    AssignmentConfigurationDto, CaptchaConfigurationDto, InvoicingConfigurationDto,
    PromotionsConfigurationDto,
};
use crate::features::events::models::{Event, Organization};
use crate::features::payments::dtos::PaymentProxyWithParametersDto;
use crate::features::payments::PaymentMethod;
use crate::shared::formatters::formatted_dates;
use crate::shared::i18n::{DateFormat, SupportedLanguage};

/// Begin and end of an event, formatted per language code
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormattedEventDatesDto {
    pub formatted_begin_date: HashMap<String, String>,
    pub formatted_begin_time: HashMap<String, String>,
    pub formatted_end_date: HashMap<String, String>,
    pub formatted_end_time: HashMap<String, String>,
}

impl FormattedEventDatesDto {
    pub fn new(event: &Event, languages: &[&SupportedLanguage]) -> Self {
        let zone = event.zone();
        Self {
            formatted_begin_date: formatted_dates(languages, event.start_ts, zone, DateFormat::EventDate),
            formatted_begin_time: formatted_dates(languages, event.start_ts, zone, DateFormat::EventTime),
            formatted_end_date: formatted_dates(languages, event.end_ts, zone, DateFormat::EventDate),
            formatted_end_time: formatted_dates(languages, event.end_ts, zone, DateFormat::EventTime),
        }
    }
}

/// Event as shown in the public listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BasicEventInfoDto {
    pub short_name: String,
    pub file_blob_id: Option<String>,
    pub display_name: String,
    pub location: String,
    pub time_zone: String,
    pub same_day: bool,
    #[serde(flatten)]
    pub dates: FormattedEventDatesDto,
}

impl BasicEventInfoDto {
    pub fn new(event: Event, languages: &[&SupportedLanguage]) -> Self {
        let dates = FormattedEventDatesDto::new(&event, languages);
        Self {
            same_day: event.is_same_day(),
            short_name: event.short_name,
            file_blob_id: event.file_blob_id,
            display_name: event.display_name,
            location: event.location,
            time_zone: event.time_zone,
            dates,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDto {
    pub name: String,
    pub email: String,
}

impl From<Organization> for OrganizationDto {
    fn from(o: Organization) -> Self {
        Self {
            name: o.name,
            email: o.email,
        }
    }
}

/// Full event page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailDto {
    pub short_name: String,
    pub display_name: String,
    pub file_blob_id: Option<String>,
    pub location: String,
    pub map_url: Option<String>,
    pub time_zone: String,
    pub same_day: bool,
    pub currency: String,
    pub vat_included: bool,
    pub vat: String,
    pub free: bool,
    pub website_url: Option<String>,
    pub terms_and_conditions_url: Option<String>,
    pub privacy_policy_url: Option<String>,
    pub content_languages: Vec<String>,
    pub organization: OrganizationDto,
    /// Markdown-rendered description per locale
    pub description: HashMap<String, String>,
    #[schema(value_type = Object)]
    pub active_payment_methods: BTreeMap<PaymentMethod, PaymentProxyWithParametersDto>,
    pub bank_account: String,
    pub bank_account_owner: Vec<String>,
    #[serde(flatten)]
    pub dates: FormattedEventDatesDto,
    pub invoicing_configuration: InvoicingConfigurationDto,
    pub captcha_configuration: CaptchaConfigurationDto,
    pub assignment_configuration: AssignmentConfigurationDto,
    pub promotions_configuration: PromotionsConfigurationDto,
}
