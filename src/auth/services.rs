use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{LoginRequest, RegisterRequest, ResetPasswordBody, ResetPasswordRequest};
use crate::error::AppError;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// At least 8 characters with one letter and one digit.
pub(crate) fn check_password_policy(password: &str) -> Result<(), AppError> {
    if password.chars().count() < 8 {
        return Err(AppError::validation(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::validation(
            "password",
            "Password must contain at least one letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(
            "password",
            "Password must contain at least one number",
        ));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), AppError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::validation("email", "Invalid email address"))
    }
}

/// Normalizes the email and reports the first failing rule.
pub(crate) fn validate_register(payload: &mut RegisterRequest) -> Result<(), AppError> {
    payload.email = normalize_email(&payload.email);
    payload.name = payload.name.trim().to_string();
    check_email(&payload.email)?;
    if payload.name.chars().count() < 2 {
        return Err(AppError::validation(
            "name",
            "Name must be at least 2 characters",
        ));
    }
    check_password_policy(&payload.password)
}

pub(crate) fn validate_login(payload: &mut LoginRequest) -> Result<(), AppError> {
    payload.email = normalize_email(&payload.email);
    check_email(&payload.email)?;
    if payload.password.is_empty() {
        return Err(AppError::validation("password", "Password is required"));
    }
    Ok(())
}

pub(crate) fn validate_reset_request(payload: &mut ResetPasswordRequest) -> Result<(), AppError> {
    payload.email = normalize_email(&payload.email);
    check_email(&payload.email)
}

pub(crate) fn validate_reset(payload: &ResetPasswordBody) -> Result<(), AppError> {
    if payload.token.trim().is_empty() {
        return Err(AppError::validation("token", "Reset token is required"));
    }
    check_password_policy(&payload.password)
}
