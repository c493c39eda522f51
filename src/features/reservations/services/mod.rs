mod reservation_rules;
mod reservation_service;

pub use reservation_rules::{plan_reservation, ReservationContext};
pub use reservation_service::{ReservationOutcome, ReservationService};
