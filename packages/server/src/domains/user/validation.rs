//! Request body validation for user create/update.
//!
//! Mirrors the registration rules enforced at the API boundary: names
//! are short alphabetic strings, passwords must mix character classes.
//! Returns the first violation as the client-visible message.

use lazy_static::lazy_static;
use regex::Regex;

use super::data::{CreateUserRequest, UpdateUserRequest};

lazy_static! {
    static ref NAME_RE: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

const PASSWORD_SPECIALS: &str = "!@#$%^&*()_+-/={}|;':\",.<>?";

fn check_name(value: &str, field: &str) -> Result<(), String> {
    if value.len() < 3 || value.len() > 50 {
        return Err(format!("{} must be between 3 and 50 characters.", field));
    }
    if !NAME_RE.is_match(value) {
        return Err(format!("{} must only contain alphabets.", field));
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), String> {
    if !EMAIL_RE.is_match(value) {
        return Err("Email must be a valid email address.".to_string());
    }
    Ok(())
}

fn check_password(value: &str) -> Result<(), String> {
    if value.len() < 8 || value.len() > 20 {
        return Err("Password must be between 8 and 20 characters.".to_string());
    }

    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if !(has_upper && has_lower && has_digit && has_special) {
        return Err(
            "Password must contain at least one uppercase, one number and one special character."
                .to_string(),
        );
    }
    Ok(())
}

fn check_required(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required.", field));
    }
    Ok(())
}

/// Validate the body of `POST /users`.
pub fn validate_create(req: &CreateUserRequest) -> Result<(), String> {
    let first_name = req.first_name.as_deref().unwrap_or("");
    check_required(first_name, "First name")?;
    check_name(first_name, "First name")?;

    let last_name = req.last_name.as_deref().unwrap_or("");
    check_required(last_name, "Last name")?;
    check_name(last_name, "Last name")?;

    let username = req.username.as_deref().unwrap_or("");
    check_required(username, "Username")?;

    let mobile_number = req.mobile_number.as_deref().unwrap_or("");
    check_required(mobile_number, "Mobile number")?;

    let email = req.email.as_deref().unwrap_or("");
    check_required(email, "Email")?;
    check_email(email)?;

    let password = req.password.as_deref().unwrap_or("");
    check_required(password, "Password")?;
    check_password(password)?;

    Ok(())
}

/// Validate the body of `PATCH /users/:id`. Absent fields are skipped.
pub fn validate_update(req: &UpdateUserRequest) -> Result<(), String> {
    if let Some(first_name) = req.first_name.as_deref() {
        check_name(first_name, "First name")?;
    }
    if let Some(last_name) = req.last_name.as_deref() {
        check_name(last_name, "Last name")?;
    }
    if let Some(email) = req.email.as_deref() {
        check_email(email)?;
    }
    if let Some(password) = req.password.as_deref() {
        check_password(password)?;
    }
    Ok(())
}
