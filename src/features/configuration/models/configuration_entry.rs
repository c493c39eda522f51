use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Scope of a configuration entry, ordered from least to most specific
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Type,
)]
#[sqlx(type_name = "configuration_scope", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigurationScope {
    System,
    Organization,
    Event,
    TicketCategory,
}

/// Database model for a configuration row, as returned by lookups
#[derive(Debug, Clone, FromRow)]
pub struct ConfigurationEntry {
    pub scope: ConfigurationScope,
    pub c_key: String,
    pub c_value: String,
}

/// The point in the scope hierarchy a lookup starts from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigurationLevel {
    pub organization_id: Option<i32>,
    pub event_id: Option<i32>,
    pub ticket_category_id: Option<i32>,
}

impl ConfigurationLevel {
    pub fn system() -> Self {
        Self::default()
    }

    pub fn organization(organization_id: i32) -> Self {
        Self {
            organization_id: Some(organization_id),
            ..Self::default()
        }
    }

    pub fn event(organization_id: i32, event_id: i32) -> Self {
        Self {
            organization_id: Some(organization_id),
            event_id: Some(event_id),
            ticket_category_id: None,
        }
    }

    pub fn ticket_category(organization_id: i32, event_id: i32, ticket_category_id: i32) -> Self {
        Self {
            organization_id: Some(organization_id),
            event_id: Some(event_id),
            ticket_category_id: Some(ticket_category_id),
        }
    }
}
