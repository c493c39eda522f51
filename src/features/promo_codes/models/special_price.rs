use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Lifecycle of a special price token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "special_price_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialPriceStatus {
    Free,
    Pending,
    Taken,
    Cancelled,
}

/// Database model for a single-use special price token
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SpecialPrice {
    pub id: i32,
    pub code: String,
    pub price_cts: i32,
    pub ticket_category_id: i32,
    pub status: SpecialPriceStatus,
}

impl SpecialPrice {
    /// Only tokens nobody has claimed yet can be used
    pub fn is_free(&self) -> bool {
        self.status == SpecialPriceStatus::Free
    }
}
