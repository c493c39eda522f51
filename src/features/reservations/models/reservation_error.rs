use thiserror::Error;

use crate::shared::constants::{
    STEP_1_ACCESS_RESTRICTED, STEP_1_ADDITIONAL_SERVICE_NOT_FOUND, STEP_1_CODE_NOT_FOUND,
    STEP_1_NOT_ENOUGH_TICKETS, STEP_1_OVER_MAXIMUM, STEP_1_SELECT_AT_LEAST_ONE,
    STEP_1_TICKET_CATEGORY_MUST_BE_SALEABLE, STEP_2_CAPTCHA_VALIDATION_FAILED,
    STEP_2_DISCOUNT_CODE_USAGE_EXCEEDED,
};
use crate::shared::types::ErrorDescriptor;

/// Reasons a reservation request is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("promo code not found or no longer valid")]
    CodeNotFound,

    #[error("CAPTCHA verification failed")]
    CaptchaValidationFailed,

    #[error("no ticket selected")]
    SelectAtLeastOne,

    #[error("too many items selected")]
    OverMaximum,

    #[error("ticket category {0} is not on sale")]
    CategoryNotSaleable(i32),

    #[error("additional service {0} not found")]
    AdditionalServiceNotFound(i32),

    #[error("ticket category {0} requires an access code")]
    AccessRestricted(i32),

    #[error("not enough tickets left in category {0}")]
    NotEnoughTickets(i32),

    #[error("promo code usage exceeded")]
    DiscountUsageExceeded,
}

impl ReservationError {
    /// Message key returned to the frontend
    pub fn code(&self) -> &'static str {
        match self {
            ReservationError::CodeNotFound => STEP_1_CODE_NOT_FOUND,
            ReservationError::CaptchaValidationFailed => STEP_2_CAPTCHA_VALIDATION_FAILED,
            ReservationError::SelectAtLeastOne => STEP_1_SELECT_AT_LEAST_ONE,
            ReservationError::OverMaximum => STEP_1_OVER_MAXIMUM,
            ReservationError::CategoryNotSaleable(_) => STEP_1_TICKET_CATEGORY_MUST_BE_SALEABLE,
            ReservationError::AdditionalServiceNotFound(_) => STEP_1_ADDITIONAL_SERVICE_NOT_FOUND,
            ReservationError::AccessRestricted(_) => STEP_1_ACCESS_RESTRICTED,
            ReservationError::NotEnoughTickets(_) => STEP_1_NOT_ENOUGH_TICKETS,
            ReservationError::DiscountUsageExceeded => STEP_2_DISCOUNT_CODE_USAGE_EXCEEDED,
        }
    }

    pub fn descriptor(&self) -> ErrorDescriptor {
        match self {
            ReservationError::CodeNotFound | ReservationError::DiscountUsageExceeded => {
                ErrorDescriptor::new("promoCode", self.code())
            }
            ReservationError::CaptchaValidationFailed => ErrorDescriptor::new("captcha", self.code()),
            ReservationError::AdditionalServiceNotFound(_) => {
                ErrorDescriptor::new("additionalService", self.code())
            }
            _ => ErrorDescriptor::global(self.code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors() {
        let code = ReservationError::CodeNotFound.descriptor();
        assert_eq!(code.field_name, "promoCode");
        assert_eq!(code.code, "error.STEP_1_CODE_NOT_FOUND");

        let tickets = ReservationError::NotEnoughTickets(3).descriptor();
        assert_eq!(tickets.field_name, "error.STEP_1_NOT_ENOUGH_TICKETS");
        assert_eq!(tickets.code, "error.STEP_1_NOT_ENOUGH_TICKETS");
    }
}
