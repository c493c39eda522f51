use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::configuration::ConfigurationKey;

/// Way a buyer can pay, as shown in the checkout
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    BankTransfer,
    OnSite,
}

/// Integration handling a payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentProxy {
    Stripe,
    Paypal,
    Offline,
    OnSite,
}

impl PaymentProxy {
    pub const ALL: [PaymentProxy; 4] = [
        PaymentProxy::Stripe,
        PaymentProxy::Paypal,
        PaymentProxy::Offline,
        PaymentProxy::OnSite,
    ];

    pub fn payment_method(&self) -> PaymentMethod {
        match self {
            PaymentProxy::Stripe => PaymentMethod::CreditCard,
            PaymentProxy::Paypal => PaymentMethod::Paypal,
            PaymentProxy::Offline => PaymentMethod::BankTransfer,
            PaymentProxy::OnSite => PaymentMethod::OnSite,
        }
    }

    /// Configuration flag switching the proxy on
    pub fn enabled_key(&self) -> ConfigurationKey {
        match self {
            PaymentProxy::Stripe => ConfigurationKey::StripeEnabled,
            PaymentProxy::Paypal => ConfigurationKey::PaypalEnabled,
            PaymentProxy::Offline => ConfigurationKey::BankTransferEnabled,
            PaymentProxy::OnSite => ConfigurationKey::OnSiteEnabled,
        }
    }
}
