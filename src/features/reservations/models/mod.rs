mod reservation_error;
mod reservation_plan;

pub use reservation_error::ReservationError;
pub use reservation_plan::{ReservationPlan, ServiceSelection, TicketSelection};
