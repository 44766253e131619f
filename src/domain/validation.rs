//! Field-level validation shared by domain inputs

use super::DomainError;

pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 100;
pub const PHONE_MAX_LEN: usize = 15;
pub const COURSE_NAME_MAX_LEN: usize = 100;
pub const DURATION_MAX_LEN: usize = 50;

pub trait Validate {
    fn validate(&self) -> Result<(), DomainError>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_max_len(field_name: &str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters (got {})",
            field_name, max, len
        )));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), DomainError> {
    validate_max_len("email", value, EMAIL_MAX_LEN)?;

    let well_formed = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !well_formed {
        return Err(DomainError::Validation(format!(
            "'{}' is not a valid email address",
            value
        )));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), DomainError> {
    validate_max_len("phone", value, PHONE_MAX_LEN)?;

    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err(DomainError::Validation(format!(
            "'{}' is not a valid phone number",
            value
        )));
    }
    Ok(())
}

/// Trims a user-supplied optional field, mapping blank input to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
