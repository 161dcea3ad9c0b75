//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Validators take already-trimmed input; use [`normalize_email`] before
//! validating or storing an address.

use std::sync::OnceLock;
use validator::ValidateEmail;

/// Shortest accepted password, counted after trimming
pub const MIN_PASSWORD_LEN: usize = 7;

/// Longest accepted password
pub const MAX_PASSWORD_LEN: usize = 128;

/// File extensions accepted for avatar uploads
pub const AVATAR_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Content types accepted for avatar uploads
pub const AVATAR_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

fn email_regex() -> &'static regex_lite::Regex {
    static EMAIL_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Trim and lowercase an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.chars().count() > 255 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate email format
///
/// The address must carry a dotted domain (`kim@ex` is rejected) and pass
/// the HTML5 address rules.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email_regex().is_match(email) || !email.validate_email() {
        return Err("Email is invalid".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err("Password too long".to_string());
    }
    if password.to_lowercase().contains("password") {
        return Err("Password cannot contain \"password\"".to_string());
    }
    Ok(())
}

/// Validate age
pub fn validate_age(age: i32) -> Result<(), String> {
    if age < 0 {
        return Err("Age must be a positive number".to_string());
    }
    Ok(())
}

/// Validate a task description
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.is_empty() {
        return Err("Description cannot be empty".to_string());
    }
    Ok(())
}

/// Validate the filename of an uploaded avatar by its extension
pub fn validate_avatar_filename(filename: &str) -> Result<(), String> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if AVATAR_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Please upload an image ({})",
            AVATAR_EXTENSIONS.join(", ")
        ))
    }
}

/// Validate the declared content type of an uploaded avatar
pub fn validate_avatar_content_type(content_type: &str) -> Result<(), String> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if AVATAR_CONTENT_TYPES.contains(&essence.as_str()) {
        Ok(())
    } else {
        Err(format!("Unsupported content type: {}", content_type))
    }
}
