use chrono_tz::Tz;
use sqlx::FromRow;

use crate::shared::formatters::parse_timezone;

/// The part of an event a code is resolved against
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventScope {
    pub id: i32,
    pub organization_id: i32,
    pub time_zone: String,
}

impl EventScope {
    pub fn zone(&self) -> Tz {
        parse_timezone(&self.time_zone)
    }
}
