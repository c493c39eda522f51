use std::fmt;

/// Configuration keys read by the public API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigurationKey {
    // Reservation
    MaxAmountOfTicketsByReservation,
    ReservationTimeout,
    ForceTicketOwnerAssignmentAtReservation,
    EnableAttendeeAutocomplete,
    EnableTicketTransfer,

    // Promotions
    DisplayDiscountCodeBox,
    UsePartnerCodeInsteadOfPromotional,

    // Captcha
    EnableCaptchaForTicketSelection,
    RecaptchaApiKey,
    RecaptchaSecret,

    // Maps
    MapsProvider,
    MapsClientApiKey,
    MapsHereApiKey,

    // Invoicing
    InvoiceAddress,
    VatNr,
    GenerateOnlyInvoice,
    EnableEuVatDirective,
    EnableCustomerReference,
    EnableItalyEInvoicing,
    VatNumberIsRequired,

    // Waiting queue
    EnableWaitingQueue,
    EnablePreRegistration,

    // Payments
    BankTransferEnabled,
    BankAccountNr,
    BankAccountOwner,
    OfflinePaymentDays,
    OnSiteEnabled,
    StripeEnabled,
    StripePublicKey,
    PaypalEnabled,
}

impl ConfigurationKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigurationKey::MaxAmountOfTicketsByReservation => {
                "MAX_AMOUNT_OF_TICKETS_BY_RESERVATION"
            }
            ConfigurationKey::ReservationTimeout => "RESERVATION_TIMEOUT",
            ConfigurationKey::ForceTicketOwnerAssignmentAtReservation => {
                "FORCE_TICKET_OWNER_ASSIGNMENT_AT_RESERVATION"
            }
            ConfigurationKey::EnableAttendeeAutocomplete => "ENABLE_ATTENDEE_AUTOCOMPLETE",
            ConfigurationKey::EnableTicketTransfer => "ENABLE_TICKET_TRANSFER",
            ConfigurationKey::DisplayDiscountCodeBox => "DISPLAY_DISCOUNT_CODE_BOX",
            ConfigurationKey::UsePartnerCodeInsteadOfPromotional => {
                "USE_PARTNER_CODE_INSTEAD_OF_PROMOTIONAL"
            }
            ConfigurationKey::EnableCaptchaForTicketSelection => {
                "ENABLE_CAPTCHA_FOR_TICKET_SELECTION"
            }
            ConfigurationKey::RecaptchaApiKey => "RECAPTCHA_API_KEY",
            ConfigurationKey::RecaptchaSecret => "RECAPTCHA_SECRET",
            ConfigurationKey::MapsProvider => "MAPS_PROVIDER",
            ConfigurationKey::MapsClientApiKey => "MAPS_CLIENT_API_KEY",
            ConfigurationKey::MapsHereApiKey => "MAPS_HERE_API_KEY",
            ConfigurationKey::InvoiceAddress => "INVOICE_ADDRESS",
            ConfigurationKey::VatNr => "VAT_NR",
            ConfigurationKey::GenerateOnlyInvoice => "GENERATE_ONLY_INVOICE",
            ConfigurationKey::EnableEuVatDirective => "ENABLE_EU_VAT_DIRECTIVE",
            ConfigurationKey::EnableCustomerReference => "ENABLE_CUSTOMER_REFERENCE",
            ConfigurationKey::EnableItalyEInvoicing => "ENABLE_ITALY_E_INVOICING",
            ConfigurationKey::VatNumberIsRequired => "VAT_NUMBER_IS_REQUIRED",
            ConfigurationKey::EnableWaitingQueue => "ENABLE_WAITING_QUEUE",
            ConfigurationKey::EnablePreRegistration => "ENABLE_PRE_REGISTRATION",
            ConfigurationKey::BankTransferEnabled => "BANK_TRANSFER_ENABLED",
            ConfigurationKey::BankAccountNr => "BANK_ACCOUNT_NR",
            ConfigurationKey::BankAccountOwner => "BANK_ACCOUNT_OWNER",
            ConfigurationKey::OfflinePaymentDays => "OFFLINE_PAYMENT_DAYS",
            ConfigurationKey::OnSiteEnabled => "ON_SITE_ENABLED",
            ConfigurationKey::StripeEnabled => "STRIPE_ENABLED",
            ConfigurationKey::StripePublicKey => "STRIPE_PUBLIC_KEY",
            ConfigurationKey::PaypalEnabled => "PAYPAL_ENABLED",
        }
    }
}

impl fmt::Display for ConfigurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
