use thiserror::Error;

use crate::features::promo_codes::models::{PromoCodeDiscount, SpecialPrice};
use crate::shared::constants::STEP_1_CODE_NOT_FOUND;

/// What a code turned out to be. Special prices and promo codes are
/// mutually exclusive, so at most one of them is ever carried.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolvedCode {
    #[default]
    None,
    Special(SpecialPrice),
    Discount(PromoCodeDiscount),
}

impl ResolvedCode {
    pub fn special_price(&self) -> Option<&SpecialPrice> {
        match self {
            ResolvedCode::Special(special) => Some(special),
            _ => None,
        }
    }

    pub fn discount(&self) -> Option<&PromoCodeDiscount> {
        match self {
            ResolvedCode::Discount(discount) => Some(discount),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ResolvedCode::None)
    }
}

/// Reasons a supplied code is refused. Buyers only ever see a single
/// message, whatever the underlying cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("promo code not found or no longer valid")]
    InvalidOrExpiredCode,
}

impl CodeError {
    /// Message key returned to the frontend
    pub fn code(&self) -> &'static str {
        match self {
            CodeError::InvalidOrExpiredCode => STEP_1_CODE_NOT_FOUND,
        }
    }
}

/// Outcome of resolving a raw code against an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeCheck {
    /// No code, or a usable one
    Accepted(ResolvedCode),
    /// Refused code; it unlocks and discounts nothing
    Rejected(CodeError),
}

impl CodeCheck {
    pub fn is_success(&self) -> bool {
        matches!(self, CodeCheck::Accepted(_))
    }

    /// The resolved code; a rejection resolves to nothing
    pub fn code(&self) -> &ResolvedCode {
        static EMPTY: ResolvedCode = ResolvedCode::None;
        match self {
            CodeCheck::Accepted(code) => code,
            CodeCheck::Rejected(_) => &EMPTY,
        }
    }

    pub fn into_code(self) -> ResolvedCode {
        match self {
            CodeCheck::Accepted(code) => code,
            CodeCheck::Rejected(_) => ResolvedCode::None,
        }
    }

    pub fn error(&self) -> Option<CodeError> {
        match self {
            CodeCheck::Accepted(_) => None,
            CodeCheck::Rejected(error) => Some(*error),
        }
    }
}
