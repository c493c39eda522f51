use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

// =============================================================================
// VALIDATED RESPONSES
// =============================================================================

/// A single rejected field or global error, identified by a message code
/// the frontend translates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    pub field_name: String,
    pub code: String,
}

impl ErrorDescriptor {
    pub fn new(field_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            code: code.into(),
        }
    }

    /// Error not bound to a specific form field
    pub fn global(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            field_name: code.clone(),
            code,
        }
    }
}

/// Response envelope for operations whose outcome may carry validation errors
/// alongside a value.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedResponse<T> {
    pub success: bool,
    pub error_count: usize,
    pub validation_errors: Vec<ErrorDescriptor>,
    pub value: Option<T>,
}

impl<T> ValidatedResponse<T> {
    pub fn ok(value: T) -> Self {
        Self {
            success: true,
            error_count: 0,
            validation_errors: Vec::new(),
            value: Some(value),
        }
    }

    pub fn failed(errors: Vec<ErrorDescriptor>, value: Option<T>) -> Self {
        Self {
            success: errors.is_empty(),
            error_count: errors.len(),
            validation_errors: errors,
            value,
        }
    }
}
