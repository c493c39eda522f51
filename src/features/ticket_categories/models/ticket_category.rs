use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "ticket_category_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategoryStatus {
    Active,
    NotActive,
}

/// Database model for a ticket category
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TicketCategory {
    pub id: i32,
    pub event_id: i32,
    pub name: String,
    pub inception: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
    pub max_tickets: i32,
    pub price_cts: i32,
    /// Hidden from the public listing unless unlocked by a code
    pub access_restricted: bool,
    /// Bounded categories own their tickets; unbounded ones share the event pool
    pub bounded: bool,
    pub status: TicketCategoryStatus,
    pub ordinal: i32,
}

impl TicketCategory {
    pub fn is_active(&self) -> bool {
        self.status == TicketCategoryStatus::Active
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }

    pub fn is_sale_in_future(&self, now: DateTime<Utc>) -> bool {
        self.inception > now
    }

    /// Active and inside its sale window
    pub fn is_on_sale(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && !self.is_sale_in_future(now) && !self.is_expired(now)
    }

    pub fn is_free(&self) -> bool {
        self.price_cts == 0
    }
}
