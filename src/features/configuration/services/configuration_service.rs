use std::collections::HashMap;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::configuration::models::{
    ConfigurationEntry, ConfigurationKey, ConfigurationLevel, ConfigurationScope,
};

/// Resolved configuration values for one lookup level
#[derive(Debug, Clone, Default)]
pub struct ConfigurationSnapshot {
    values: HashMap<String, String>,
}

impl ConfigurationSnapshot {
    /// Keep, for each key, the value from the most specific scope
    pub fn from_entries(entries: Vec<ConfigurationEntry>) -> Self {
        let mut best: HashMap<String, (ConfigurationScope, String)> = HashMap::new();
        for entry in entries {
            match best.get(&entry.c_key) {
                Some((scope, _)) if *scope >= entry.scope => {}
                _ => {
                    best.insert(entry.c_key, (entry.scope, entry.c_value));
                }
            }
        }

        Self {
            values: best
                .into_iter()
                .map(|(key, (_, value))| (key, value))
                .collect(),
        }
    }

    pub fn get_string(&self, key: ConfigurationKey) -> Option<&str> {
        self.values
            .get(key.as_str())
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn get_bool(&self, key: ConfigurationKey, default: bool) -> bool {
        match self.get_string(key) {
            Some(v) => v.trim().eq_ignore_ascii_case("true"),
            None => default,
        }
    }

    pub fn get_int(&self, key: ConfigurationKey, default: i64) -> i64 {
        self.get_string(key)
            .and_then(|v| {
                v.trim()
                    .parse::<i64>()
                    .map_err(|_| tracing::warn!("Configuration {} is not a number: {}", key, v))
                    .ok()
            })
            .unwrap_or(default)
    }

    /// Secret to verify ticket selection CAPTCHAs with, when they are enabled
    pub fn captcha_secret_for_ticket_selection(&self) -> Option<&str> {
        if self.get_bool(ConfigurationKey::EnableCaptchaForTicketSelection, false) {
            self.get_string(ConfigurationKey::RecaptchaSecret)
        } else {
            None
        }
    }
}

/// Service for reading scoped business configuration
pub struct ConfigurationService {
    pool: PgPool,
}

impl ConfigurationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the given keys as seen from `level`
    pub async fn load(
        &self,
        level: ConfigurationLevel,
        keys: &[ConfigurationKey],
    ) -> Result<ConfigurationSnapshot> {
        let key_names: Vec<String> = keys.iter().map(|k| k.as_str().to_string()).collect();

        let entries: Vec<ConfigurationEntry> = sqlx::query_as(
            r#"
            SELECT scope, c_key, c_value
            FROM configuration
            WHERE c_key = ANY($1)
              AND (
                scope = 'SYSTEM'
                OR (scope = 'ORGANIZATION' AND organization_id = $2)
                OR (scope = 'EVENT' AND event_id = $3)
                OR (scope = 'TICKET_CATEGORY' AND ticket_category_id = $4)
              )
            "#,
        )
        .bind(&key_names)
        .bind(level.organization_id)
        .bind(level.event_id)
        .bind(level.ticket_category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(ConfigurationSnapshot::from_entries(entries))
    }

    pub async fn get_bool(
        &self,
        level: ConfigurationLevel,
        key: ConfigurationKey,
        default: bool,
    ) -> Result<bool> {
        Ok(self.load(level, &[key]).await?.get_bool(key, default))
    }

    pub async fn get_int(
        &self,
        level: ConfigurationLevel,
        key: ConfigurationKey,
        default: i64,
    ) -> Result<i64> {
        Ok(self.load(level, &[key]).await?.get_int(key, default))
    }

    pub async fn get_string(
        &self,
        level: ConfigurationLevel,
        key: ConfigurationKey,
    ) -> Result<Option<String>> {
        Ok(self
            .load(level, &[key])
            .await?
            .get_string(key)
            .map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(scope: ConfigurationScope, key: ConfigurationKey, value: &str) -> ConfigurationEntry {
        ConfigurationEntry {
            scope,
            c_key: key.as_str().to_string(),
            c_value: value.to_string(),
        }
    }

    #[test]
    fn test_most_specific_scope_wins() {
        let snapshot = ConfigurationSnapshot::from_entries(vec![
            entry(
                ConfigurationScope::TicketCategory,
                ConfigurationKey::MaxAmountOfTicketsByReservation,
                "2",
            ),
            entry(
                ConfigurationScope::System,
                ConfigurationKey::MaxAmountOfTicketsByReservation,
                "10",
            ),
            entry(
                ConfigurationScope::Event,
                ConfigurationKey::MaxAmountOfTicketsByReservation,
                "4",
            ),
        ]);

        assert_eq!(
            snapshot.get_int(ConfigurationKey::MaxAmountOfTicketsByReservation, 5),
            2
        );
    }

    #[test]
    fn test_defaults_for_missing_or_invalid_values() {
        let snapshot = ConfigurationSnapshot::from_entries(vec![
            entry(
                ConfigurationScope::Event,
                ConfigurationKey::ReservationTimeout,
                "soon",
            ),
            entry(ConfigurationScope::Event, ConfigurationKey::BankAccountNr, "  "),
        ]);

        assert_eq!(snapshot.get_int(ConfigurationKey::ReservationTimeout, 25), 25);
        assert!(snapshot.get_bool(ConfigurationKey::DisplayDiscountCodeBox, true));
        assert_eq!(snapshot.get_string(ConfigurationKey::BankAccountNr), None);
    }

    #[test]
    fn test_bool_parsing_is_case_insensitive() {
        let snapshot = ConfigurationSnapshot::from_entries(vec![entry(
            ConfigurationScope::Organization,
            ConfigurationKey::EnableWaitingQueue,
            "TRUE",
        )]);

        assert!(snapshot.get_bool(ConfigurationKey::EnableWaitingQueue, false));
    }

    #[test]
    fn test_captcha_needs_flag_and_secret() {
        let enabled_without_secret = ConfigurationSnapshot::from_entries(vec![entry(
            ConfigurationScope::Event,
            ConfigurationKey::EnableCaptchaForTicketSelection,
            "true",
        )]);
        assert_eq!(enabled_without_secret.captcha_secret_for_ticket_selection(), None);

        let enabled = ConfigurationSnapshot::from_entries(vec![
            entry(
                ConfigurationScope::Event,
                ConfigurationKey::EnableCaptchaForTicketSelection,
                "true",
            ),
            entry(ConfigurationScope::System, ConfigurationKey::RecaptchaSecret, "s3cret"),
        ]);
        assert_eq!(enabled.captcha_secret_for_ticket_selection(), Some("s3cret"));

        let disabled = ConfigurationSnapshot::from_entries(vec![entry(
            ConfigurationScope::System,
            ConfigurationKey::RecaptchaSecret,
            "s3cret",
        )]);
        assert_eq!(disabled.captcha_secret_for_ticket_selection(), None);
    }
}
