mod payment_proxy;

pub use payment_proxy::{PaymentMethod, PaymentProxy};
