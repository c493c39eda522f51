use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::shared::constants::{EMPTY_FIELD, TERMS_NOT_ACCEPTED};
use crate::shared::types::ErrorDescriptor;

lazy_static! {
    /// Regex for validating language tags sent by the frontend
    /// Two or three letter primary tag, optional region
    /// - Valid: "en", "it", "de-CH", "pt-BR"
    /// - Invalid: "", "english", "en_US", "e"
    pub static ref LANGUAGE_TAG_REGEX: Regex = Regex::new(r"^[a-z]{2,3}(?:-[A-Z]{2})?$").unwrap();
}

/// Trim the input, mapping blank strings to `None`
pub fn trim_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Reject empty and whitespace-only values
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(EMPTY_FIELD));
    }
    Ok(())
}

pub fn accepted(value: &bool) -> Result<(), ValidationError> {
    if *value {
        Ok(())
    } else {
        Err(ValidationError::new(TERMS_NOT_ACCEPTED))
    }
}

/// Flatten `validator` field errors into message codes, using the camelCase
/// field names the frontend submits
pub fn error_descriptors(errors: &ValidationErrors) -> Vec<ErrorDescriptor> {
    let mut descriptors: Vec<ErrorDescriptor> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field_name = camel_case(&field);
            field_errors
                .iter()
                .map(move |e| ErrorDescriptor::new(field_name.clone(), e.code.to_string()))
        })
        .collect();
    descriptors.sort_by(|a, b| a.field_name.cmp(&b.field_name));
    descriptors
}

fn camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            result.extend(c.to_uppercase());
            upper = false;
        } else {
            result.push(c);
        }
    }
    result
}
