//! Payment methods offered for an event.
//!
//! Each payment proxy is switched on per event through configuration. Free
//! events never list a payment method. There are no endpoints of its own;
//! the event detail embeds the available methods.

pub mod dtos;
pub mod models;
pub mod services;

pub use models::{PaymentMethod, PaymentProxy};
pub use services::PaymentService;
