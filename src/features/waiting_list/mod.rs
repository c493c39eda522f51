//! Waiting list and pre-registration.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/v2/public/event/{eventName}/waiting-list/subscribe` | No | Join the waiting list |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::WaitingListService;
