//! Input validation for account names and passwords

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{AppError, AppResult};

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 24;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 72;

/// Validate an account name
pub fn validate_name(name: &str) -> AppResult<()> {
    let length = name.chars().count();
    if !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&length) {
        return Err(AppError::bad_request(format!(
            "Name must be between {} and {} characters long",
            NAME_MIN_LENGTH, NAME_MAX_LENGTH
        )));
    }

    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_]*$").expect("Failed to compile name regex"));

    if !regex.is_match(name) {
        return Err(AppError::bad_request(
            "Name can only contain letters, numbers, and underscores",
        ));
    }

    Ok(())
}

/// Validate a password together with its confirmation
pub fn validate_password(password: &str, confirm_password: &str) -> AppResult<()> {
    if password != confirm_password {
        return Err(AppError::bad_request("Passwords do not match"));
    }

    let length = password.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
        return Err(AppError::bad_request(format!(
            "Password must be between {} and {} characters long",
            PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH
        )));
    }

    static PASSWORD_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PASSWORD_REGEX.get_or_init(|| {
        Regex::new(r#"^[A-Za-z0-9!@#$%^&*()_\-+=\[\]{};:'",.<>?/\\|~]*$"#)
            .expect("Failed to compile password regex")
    });

    if !regex.is_match(password) {
        return Err(AppError::bad_request(
            "Password contains characters that are not allowed",
        ));
    }

    Ok(())
}
