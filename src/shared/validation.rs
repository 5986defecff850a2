//! Validation Utilities
//!
//! Conversion of `validator` failures into [`AppError`] plus the custom field
//! rules used by the request schemas.

use std::borrow::Cow;

use chrono::NaiveDate;
use validator::{ValidationError, ValidationErrors};

use super::error::AppError;

/// Accepted (and emitted) format for dates of birth, e.g. `24-03-1996`.
pub const DATE_OF_BIRTH_FORMAT: &str = "%d-%m-%Y";

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect();
    field_errors.sort();

    let message = field_errors
        .first()
        .map(|(field, message)| format!("{}: {}", field, message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// ASCII letters and digits only, at least one character.
pub fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(rule("alphanumeric", "must contain only letters and digits"))
    }
}

/// ASCII letters only, at least one character.
pub fn validate_alphabetic(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(rule("alpha", "must contain only letters"))
    }
}

/// Exactly ten ASCII digits.
pub fn validate_mobile_number(value: &str) -> Result<(), ValidationError> {
    if value.len() == 10 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(rule("mobile_number", "must be exactly 10 digits"))
    }
}

pub fn validate_gender(value: &str) -> Result<(), ValidationError> {
    match value {
        "male" | "female" | "other" => Ok(()),
        _ => Err(rule("gender", "must be one of: male, female, other")),
    }
}

pub fn validate_date_of_birth(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, DATE_OF_BIRTH_FORMAT)
        .map(|_| ())
        .map_err(|_| rule("date_of_birth", "invalid date format, expected DD-MM-YYYY"))
}

/// Parse a `DD-MM-YYYY` date of birth.
pub fn parse_date_of_birth(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, DATE_OF_BIRTH_FORMAT).map_err(|_| {
        AppError::Validation("date_of_birth: invalid date format, expected DD-MM-YYYY".into())
    })
}

/// Format a date of birth the same way it is accepted.
pub fn format_date_of_birth(date: NaiveDate) -> String {
    date.format(DATE_OF_BIRTH_FORMAT).to_string()
}
