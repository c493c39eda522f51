use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::core::error::Result;
use crate::features::configuration::{ConfigurationKey, ConfigurationService, ConfigurationSnapshot};
use crate::features::events::models::Event;
use crate::features::payments::dtos::PaymentProxyWithParametersDto;
use crate::features::payments::models::{PaymentMethod, PaymentProxy};
use crate::shared::clock::Clock;
use crate::shared::constants::DEFAULT_OFFLINE_PAYMENT_DAYS;

const PAYMENT_KEYS: &[ConfigurationKey] = &[
    ConfigurationKey::StripeEnabled,
    ConfigurationKey::PaypalEnabled,
    ConfigurationKey::BankTransferEnabled,
    ConfigurationKey::OnSiteEnabled,
    ConfigurationKey::OfflinePaymentDays,
    ConfigurationKey::StripePublicKey,
    ConfigurationKey::BankAccountNr,
    ConfigurationKey::BankAccountOwner,
];

/// Service listing the payment methods available for an event
pub struct PaymentService {
    configuration: Arc<ConfigurationService>,
    clock: Arc<dyn Clock>,
}

impl PaymentService {
    pub fn new(configuration: Arc<ConfigurationService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            configuration,
            clock,
        }
    }

    /// Active payment methods keyed by method; empty for free events
    pub async fn available_payment_methods(
        &self,
        event: &Event,
    ) -> Result<BTreeMap<PaymentMethod, PaymentProxyWithParametersDto>> {
        if event.is_free_of_charge() {
            return Ok(BTreeMap::new());
        }

        let snapshot = self
            .configuration
            .load(event.configuration_level(), PAYMENT_KEYS)
            .await?;

        let now = self.clock.now_utc();
        Ok(active_proxies(&snapshot, event, now)
            .into_iter()
            .map(|proxy| {
                (
                    proxy.payment_method(),
                    PaymentProxyWithParametersDto {
                        payment_proxy: proxy,
                        parameters: proxy_parameters(proxy, &snapshot),
                    },
                )
            })
            .collect())
    }
}

/// Proxies switched on for the event. Bank transfers also need enough time
/// before the event starts for the payment to arrive.
pub fn active_proxies(
    snapshot: &ConfigurationSnapshot,
    event: &Event,
    now: DateTime<Utc>,
) -> Vec<PaymentProxy> {
    PaymentProxy::ALL
        .into_iter()
        .filter(|proxy| snapshot.get_bool(proxy.enabled_key(), false))
        .filter(|proxy| match proxy {
            PaymentProxy::Offline => {
                let days = snapshot.get_int(
                    ConfigurationKey::OfflinePaymentDays,
                    DEFAULT_OFFLINE_PAYMENT_DAYS,
                );
                event.start_ts - now >= Duration::days(days)
            }
            _ => true,
        })
        .collect()
}

pub fn proxy_parameters(
    proxy: PaymentProxy,
    snapshot: &ConfigurationSnapshot,
) -> BTreeMap<String, serde_json::Value> {
    let mut parameters = BTreeMap::new();
    match proxy {
        PaymentProxy::Stripe => {
            parameters.insert(
                "publicKey".to_string(),
                json!(snapshot.get_string(ConfigurationKey::StripePublicKey)),
            );
        }
        PaymentProxy::Offline => {
            parameters.insert(
                "bankAccount".to_string(),
                json!(snapshot
                    .get_string(ConfigurationKey::BankAccountNr)
                    .unwrap_or_default()),
            );
            parameters.insert(
                "bankAccountOwner".to_string(),
                json!(bank_account_owner(snapshot)),
            );
        }
        PaymentProxy::Paypal | PaymentProxy::OnSite => {}
    }
    parameters
}

/// Owner lines of the bank account, as configured one per line
pub fn bank_account_owner(snapshot: &ConfigurationSnapshot) -> Vec<String> {
    snapshot
        .get_string(ConfigurationKey::BankAccountOwner)
        .unwrap_or_default()
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}
