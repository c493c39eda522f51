use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::configuration::{ConfigurationKey, ConfigurationSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicingConfigurationDto {
    pub user_can_download_receipt_or_invoice: bool,
    pub eu_vat_checking_enabled: bool,
    pub invoice_allowed: bool,
    pub only_invoice: bool,
    pub customer_reference_enabled: bool,
    pub enabled_italy_e_invoicing: bool,
    pub vat_number_strictly_required: bool,
}

impl InvoicingConfigurationDto {
    pub fn from_snapshot(snapshot: &ConfigurationSnapshot) -> Self {
        let italy_e_invoicing = snapshot.get_bool(ConfigurationKey::EnableItalyEInvoicing, false);
        let eu_vat_checking_enabled = snapshot.get_bool(ConfigurationKey::EnableEuVatDirective, false);
        let has_invoice_data = snapshot.get_string(ConfigurationKey::InvoiceAddress).is_some()
            && snapshot.get_string(ConfigurationKey::VatNr).is_some();
        let invoice_allowed = has_invoice_data || eu_vat_checking_enabled;

        Self {
            // Italian e-invoices are delivered by the tax authority, not by us
            user_can_download_receipt_or_invoice: !italy_e_invoicing,
            eu_vat_checking_enabled,
            invoice_allowed,
            only_invoice: invoice_allowed
                && snapshot.get_bool(ConfigurationKey::GenerateOnlyInvoice, false),
            customer_reference_enabled: snapshot
                .get_bool(ConfigurationKey::EnableCustomerReference, false),
            enabled_italy_e_invoicing: italy_e_invoicing,
            vat_number_strictly_required: snapshot
                .get_bool(ConfigurationKey::VatNumberIsRequired, false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaConfigurationDto {
    pub captcha_for_ticket_selection: bool,
    /// Public site key for the browser widget
    pub recaptcha_api_key: Option<String>,
}

impl CaptchaConfigurationDto {
    pub fn from_snapshot(snapshot: &ConfigurationSnapshot) -> Self {
        let enabled = snapshot.captcha_secret_for_ticket_selection().is_some();
        Self {
            captcha_for_ticket_selection: enabled,
            recaptcha_api_key: enabled
                .then(|| snapshot.get_string(ConfigurationKey::RecaptchaApiKey))
                .flatten()
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentConfigurationDto {
    pub force_assignment: bool,
    pub enable_attendee_autocomplete: bool,
    pub enable_ticket_transfer: bool,
}

impl AssignmentConfigurationDto {
    pub fn from_snapshot(snapshot: &ConfigurationSnapshot) -> Self {
        Self {
            force_assignment: snapshot
                .get_bool(ConfigurationKey::ForceTicketOwnerAssignmentAtReservation, false),
            enable_attendee_autocomplete: snapshot
                .get_bool(ConfigurationKey::EnableAttendeeAutocomplete, true),
            enable_ticket_transfer: snapshot.get_bool(ConfigurationKey::EnableTicketTransfer, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromotionsConfigurationDto {
    pub has_access_promotions: bool,
    pub use_partner_code: bool,
}

impl PromotionsConfigurationDto {
    /// `has_codes`: the event has restricted categories or promo codes
    pub fn from_snapshot(snapshot: &ConfigurationSnapshot, has_codes: bool) -> Self {
        Self {
            has_access_promotions: snapshot.get_bool(ConfigurationKey::DisplayDiscountCodeBox, true)
                && has_codes,
            use_partner_code: snapshot
                .get_bool(ConfigurationKey::UsePartnerCodeInsteadOfPromotional, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::configuration_snapshot;

    #[test]
    fn test_invoicing_defaults() {
        let conf = InvoicingConfigurationDto::from_snapshot(&configuration_snapshot(&[]));

        assert!(conf.user_can_download_receipt_or_invoice);
        assert!(!conf.invoice_allowed);
        assert!(!conf.only_invoice);
    }

    #[test]
    fn test_invoice_requires_address_and_vat_number() {
        let only_address = configuration_snapshot(&[
            (ConfigurationKey::InvoiceAddress, "Via Roma 1"),
            (ConfigurationKey::GenerateOnlyInvoice, "true"),
        ]);
        assert!(!InvoicingConfigurationDto::from_snapshot(&only_address).invoice_allowed);

        let complete = configuration_snapshot(&[
            (ConfigurationKey::InvoiceAddress, "Via Roma 1"),
            (ConfigurationKey::VatNr, "IT123"),
            (ConfigurationKey::GenerateOnlyInvoice, "true"),
        ]);
        let conf = InvoicingConfigurationDto::from_snapshot(&complete);
        assert!(conf.invoice_allowed);
        assert!(conf.only_invoice);
    }

    #[test]
    fn test_italy_e_invoicing_disables_downloads() {
        let snapshot = configuration_snapshot(&[(ConfigurationKey::EnableItalyEInvoicing, "true")]);
        let conf = InvoicingConfigurationDto::from_snapshot(&snapshot);

        assert!(conf.enabled_italy_e_invoicing);
        assert!(!conf.user_can_download_receipt_or_invoice);
    }

    #[test]
    fn test_captcha_site_key_only_when_enabled() {
        let disabled = configuration_snapshot(&[(ConfigurationKey::RecaptchaApiKey, "site")]);
        assert_eq!(
            CaptchaConfigurationDto::from_snapshot(&disabled),
            CaptchaConfigurationDto {
                captcha_for_ticket_selection: false,
                recaptcha_api_key: None,
            }
        );

        let enabled = configuration_snapshot(&[
            (ConfigurationKey::EnableCaptchaForTicketSelection, "true"),
            (ConfigurationKey::RecaptchaSecret, "secret"),
            (ConfigurationKey::RecaptchaApiKey, "site"),
        ]);
        let conf = CaptchaConfigurationDto::from_snapshot(&enabled);
        assert!(conf.captcha_for_ticket_selection);
        assert_eq!(conf.recaptcha_api_key.as_deref(), Some("site"));
    }

    #[test]
    fn test_assignment_defaults() {
        let conf = AssignmentConfigurationDto::from_snapshot(&configuration_snapshot(&[]));
        assert!(!conf.force_assignment);
        assert!(conf.enable_attendee_autocomplete);
        assert!(conf.enable_ticket_transfer);
    }

    #[test]
    fn test_access_promotions_need_codes_and_box() {
        let empty = configuration_snapshot(&[]);
        assert!(PromotionsConfigurationDto::from_snapshot(&empty, true).has_access_promotions);
        assert!(!PromotionsConfigurationDto::from_snapshot(&empty, false).has_access_promotions);

        let hidden = configuration_snapshot(&[(ConfigurationKey::DisplayDiscountCodeBox, "false")]);
        assert!(!PromotionsConfigurationDto::from_snapshot(&hidden, true).has_access_promotions);
    }
}
