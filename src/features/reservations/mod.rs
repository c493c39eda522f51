//! Ticket reservations.
//!
//! A buyer's selection is checked against the categories and additional
//! services on sale, then written as a pending reservation holding the
//! claimed tickets until it expires. Refusals are reported as message codes
//! in a `ValidatedResponse`.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/v2/public/event/{eventName}/reserve-tickets?lang=` | No | Create a pending reservation |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::ReservationError;
pub use services::ReservationService;
