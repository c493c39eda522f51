use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::{accepted, not_blank, LANGUAGE_TAG_REGEX};

/// Request DTO for joining the waiting list or pre-registering
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct WaitingQueueSubscriptionDto {
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, code = "error.maxLength", message = "First name must not exceed 255 characters")
    )]
    pub first_name: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 255, code = "error.maxLength", message = "Last name must not exceed 255 characters")
    )]
    pub last_name: String,

    #[validate(email(code = "error.email", message = "Invalid email format"))]
    pub email: String,

    /// Category the subscriber is interested in
    pub selected_category: Option<i32>,

    #[validate(regex(path = *LANGUAGE_TAG_REGEX, code = "error.userLanguage", message = "Invalid language"))]
    pub user_language: Option<String>,

    #[validate(custom(function = "accepted"))]
    pub term_and_conditions_accepted: bool,
}

impl WaitingQueueSubscriptionDto {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::error_descriptors;

    fn valid() -> WaitingQueueSubscriptionDto {
        WaitingQueueSubscriptionDto {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            selected_category: Some(1),
            user_language: Some("en".to_string()),
            term_and_conditions_accepted: true,
        }
    }

    #[test]
    fn test_valid_subscription() {
        assert!(valid().validate().is_ok());
        assert_eq!(valid().full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_invalid_subscription_codes() {
        let dto = WaitingQueueSubscriptionDto {
            first_name: "  ".to_string(),
            email: "not-an-email".to_string(),
            term_and_conditions_accepted: false,
            ..valid()
        };

        let errors = error_descriptors(&dto.validate().unwrap_err());
        let pairs: Vec<(&str, &str)> = errors
            .iter()
            .map(|e| (e.field_name.as_str(), e.code.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("email", "error.email"),
                ("firstName", "error.emptyField"),
                ("termAndConditionsAccepted", "error.termAndConditionsAccepted"),
            ]
        );
    }

    #[test]
    fn test_language_tag_is_checked() {
        let dto = WaitingQueueSubscriptionDto {
            user_language: Some("english".to_string()),
            ..valid()
        };
        assert!(dto.validate().is_err());
    }
}
