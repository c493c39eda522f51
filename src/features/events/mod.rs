//! Public event catalogue.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v2/public/events` | No | Published events |
//! | GET | `/api/v2/public/event/{eventName}` | No | Event details |
//! | GET | `/api/v2/public/event/{eventName}/languages` | No | Content languages |
//! | GET | `/api/v2/public/event/{eventName}/calendar/{locale}` | No | ICS export or Google Calendar redirect |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::{Event, EventStatus};
pub use services::EventService;
