//! Promotional and special price codes.
//!
//! A code typed by a buyer is either a single-use special price token, which
//! unlocks one seat in an access-restricted category, or a reusable promo
//! code granting a discount or access to a hidden category. This feature
//! resolves a raw code against an event and exposes the rules deciding which
//! categories a resolved code unlocks and discounts.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v2/public/event/{eventName}/validate-code` | No | Validate a code for an event |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::{CodeCheck, CodeError, EventScope, PromoCodeDiscount, ResolvedCode, SpecialPrice};
pub use services::{
    max_tickets_for_category, should_apply_discount, should_display_restricted_category,
    CodeRepository, PgCodeRepository, PromoCodeService,
};
