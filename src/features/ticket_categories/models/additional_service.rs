use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "additional_service_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdditionalServiceType {
    Donation,
    Supplement,
}

/// How many units of a supplement a buyer may add
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "supplement_policy", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplementPolicy {
    MandatoryOneForTicket,
    OptionalUnlimitedAmount,
    OptionalMaxAmountPerTicket,
    OptionalMaxAmountPerReservation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "additional_service_text_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdditionalServiceTextType {
    Title,
    Description,
}

/// Database model for a donation or supplement sold together with tickets
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AdditionalService {
    pub id: i32,
    pub event_id: i32,
    pub price_cts: i32,
    pub fix_price: bool,
    pub ordinal: i32,
    /// -1 when the quantity is unlimited
    pub available_qty: i32,
    pub max_qty_per_order: i32,
    pub inception_ts: DateTime<Utc>,
    pub expiration_ts: DateTime<Utc>,
    pub vat: Option<Decimal>,
    pub vat_applies: bool,
    pub service_type: AdditionalServiceType,
    pub supplement_policy: Option<SupplementPolicy>,
}

impl AdditionalService {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_ts <= now
    }

    pub fn is_sale_in_future(&self, now: DateTime<Utc>) -> bool {
        self.inception_ts > now
    }
}

/// Localized title or description of an additional service
#[derive(Debug, Clone, FromRow)]
pub struct AdditionalServiceText {
    pub additional_service_id: i32,
    pub locale: String,
    pub text_type: AdditionalServiceTextType,
    pub value: String,
}
