//! Ticket categories and additional services offered for an event.
//!
//! The listing depends on the code a buyer entered: access codes and special
//! prices reveal restricted categories, discounts change the displayed
//! prices and may lower the selectable quantity. The same listing tells the
//! frontend whether to offer the waiting list or a pre-registration form.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v2/public/event/{eventName}/ticket-categories?code=` | No | Categories, supplements and waiting list flags |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::{
    AdditionalService, SaleableAdditionalService, SaleableTicketCategory, TicketCategory,
};
pub use services::TicketCategoryService;
