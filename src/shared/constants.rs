// =============================================================================
// ERROR CODES
// =============================================================================
//
// Message keys returned in `ValidatedResponse::validation_errors`; the
// frontend owns their translations.

pub const STEP_1_CODE_NOT_FOUND: &str = "error.STEP_1_CODE_NOT_FOUND";
pub const STEP_1_ACCESS_RESTRICTED: &str = "error.STEP_1_ACCESS_RESTRICTED";
pub const STEP_1_NOT_ENOUGH_TICKETS: &str = "error.STEP_1_NOT_ENOUGH_TICKETS";
pub const STEP_1_SELECT_AT_LEAST_ONE: &str = "error.STEP_1_SELECT_AT_LEAST_ONE";
pub const STEP_1_OVER_MAXIMUM: &str = "error.STEP_1_OVER_MAXIMUM";
pub const STEP_1_TICKET_CATEGORY_MUST_BE_SALEABLE: &str =
    "error.STEP_1_TICKET_CATEGORY_MUST_BE_SALEABLE";
pub const STEP_1_ADDITIONAL_SERVICE_NOT_FOUND: &str = "error.STEP_1_ADDITIONAL_SERVICE_NOT_FOUND";
pub const STEP_2_CAPTCHA_VALIDATION_FAILED: &str = "error.STEP_2_CAPTCHA_VALIDATION_FAILED";
pub const STEP_2_DISCOUNT_CODE_USAGE_EXCEEDED: &str = "error.STEP_2_DISCOUNT_CODE_USAGE_EXCEEDED";

pub const EMPTY_FIELD: &str = "error.emptyField";
pub const INVALID_CATEGORY: &str = "error.category";
pub const TERMS_NOT_ACCEPTED: &str = "error.termAndConditionsAccepted";

// =============================================================================
// DEFAULTS
// =============================================================================

/// Tickets per reservation when `MAX_AMOUNT_OF_TICKETS_BY_RESERVATION` is unset
pub const DEFAULT_MAX_TICKETS_PER_RESERVATION: i32 = 5;

/// Minutes a pending reservation holds its tickets
pub const DEFAULT_RESERVATION_TIMEOUT_MINUTES: i64 = 25;

/// Days before the event start after which bank transfers are no longer offered
pub const DEFAULT_OFFLINE_PAYMENT_DAYS: i64 = 5;
