mod payment_service;

pub use payment_service::{active_proxies, bank_account_owner, proxy_parameters, PaymentService};
