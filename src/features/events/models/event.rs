use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

use crate::features::configuration::ConfigurationLevel;
use crate::features::promo_codes::EventScope;
use crate::shared::formatters::{is_same_day, parse_timezone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "event_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Draft,
    Public,
    Disabled,
}

/// Database model for an event
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Event {
    pub id: i32,
    pub short_name: String,
    pub display_name: String,
    pub status: EventStatus,
    pub organization_id: i32,
    pub time_zone: String,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    pub currency: String,
    pub regular_price_cts: i32,
    pub vat_percent: Option<Decimal>,
    pub vat_included: bool,
    pub languages: Vec<String>,
    pub file_blob_id: Option<String>,
    pub website_url: Option<String>,
    pub terms_url: Option<String>,
    pub privacy_url: Option<String>,
}

impl Event {
    pub fn zone(&self) -> Tz {
        parse_timezone(&self.time_zone)
    }

    pub fn begin(&self) -> DateTime<Tz> {
        self.start_ts.with_timezone(&self.zone())
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end_ts.with_timezone(&self.zone())
    }

    pub fn is_disabled(&self) -> bool {
        self.status == EventStatus::Disabled
    }

    pub fn is_free_of_charge(&self) -> bool {
        self.regular_price_cts == 0
    }

    pub fn is_same_day(&self) -> bool {
        is_same_day(self.start_ts, self.end_ts, self.zone())
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_ts <= now
    }

    /// Latitude and longitude, when both are set
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        match (self.latitude.as_deref(), self.longitude.as_deref()) {
            (Some(lat), Some(lng)) if !lat.trim().is_empty() && !lng.trim().is_empty() => {
                Some((lat.trim(), lng.trim()))
            }
            _ => None,
        }
    }

    /// VAT rate applied to prices, zero when none is configured
    pub fn vat(&self) -> Decimal {
        self.vat_percent.unwrap_or(Decimal::ZERO)
    }

    pub fn scope(&self) -> EventScope {
        EventScope {
            id: self.id,
            organization_id: self.organization_id,
            time_zone: self.time_zone.clone(),
        }
    }

    pub fn configuration_level(&self) -> ConfigurationLevel {
        ConfigurationLevel::event(self.organization_id, self.id)
    }
}
