//! Input validation for account credentials

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Role;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    let length = username.chars().count();
    if length < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if length > 80 {
        return Err("Username must be at most 80 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^\P{Cc}+$").expect("Failed to compile username regex"));

    // Spaces and symbols are fine; control characters are not
    if !regex.is_match(username) {
        return Err("Username cannot contain control characters".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate that the confirmation field repeats the password
pub fn validate_password_confirmation(password: &str, confirm: &str) -> Result<(), String> {
    if confirm.is_empty() {
        return Err("Confirm Password is required".to_string());
    }

    if password != confirm {
        return Err("Passwords must match".to_string());
    }

    Ok(())
}

/// Validate the role picked on the registration form
pub fn validate_registration_role(role: &str) -> Result<Role, String> {
    match role.parse::<Role>() {
        Ok(role) if Role::SELF_REGISTRABLE.contains(&role) => Ok(role),
        _ => Err("Role must be one of: student, professor".to_string()),
    }
}
