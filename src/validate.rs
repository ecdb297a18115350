//! Shared form-validation rules.
//! Signup, profile edit and password change all consume the same named rules
//! so field messages stay consistent across forms. Checks return the first
//! violated rule for a field, in the order the forms report them.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

/// Symbols accepted by the password strength rule.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// A single pinpointed violation: the form field it belongs to and the
/// message the rendering layer shows inline next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_ten_digit_mobile(mobile: &str) -> bool {
    MOBILE_RE.is_match(mobile)
}

/// Conjunction of all password component rules.
pub fn is_strong_password(password: &str) -> bool {
    check_password(password).is_none()
}

fn has_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// First/last name: required, at least 2 chars, no embedded whitespace.
/// `label` is the human form of the field ("First name" / "Last name").
pub fn check_name(field: &'static str, label: &str, value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::new(field, format!("{label} is required")));
    }
    if value.chars().count() < 2 {
        return Some(FieldError::new(field, format!("{label} must be at least 2 characters")));
    }
    if has_whitespace(value) {
        return Some(FieldError::new(field, format!("{label} cannot contain spaces")));
    }
    None
}

pub fn check_email(value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::new("email", "Email is required"));
    }
    if !is_valid_email(value) {
        return Some(FieldError::new("email", "Please enter a valid email address"));
    }
    if has_whitespace(value) {
        return Some(FieldError::new("email", "Email cannot contain spaces"));
    }
    None
}

pub fn check_mobile(value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::new("mobile", "Mobile number is required"));
    }
    if !is_ten_digit_mobile(value) {
        return Some(FieldError::new("mobile", "Please enter a valid 10-digit mobile number"));
    }
    None
}

/// Password strength: 8-32 chars, one lowercase, one uppercase, one digit,
/// one symbol from [`PASSWORD_SYMBOLS`], no whitespace.
pub fn check_password(value: &str) -> Option<FieldError> {
    const FIELD: &str = "password";
    if value.is_empty() {
        return Some(FieldError::new(FIELD, "Password is required"));
    }
    let len = value.chars().count();
    if len < 8 {
        return Some(FieldError::new(FIELD, "Password must be at least 8 characters"));
    }
    if len > 32 {
        return Some(FieldError::new(FIELD, "Password must not exceed 32 characters"));
    }
    if has_whitespace(value) {
        return Some(FieldError::new(FIELD, "Password cannot contain spaces"));
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Some(FieldError::new(FIELD, "Password must contain at least one lowercase letter"));
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Some(FieldError::new(FIELD, "Password must contain at least one uppercase letter"));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Some(FieldError::new(FIELD, "Password must contain at least one number"));
    }
    if !value.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Some(FieldError::new(FIELD, "Password must contain at least one special character"));
    }
    None
}

pub fn check_confirm(password: &str, confirm: &str) -> Option<FieldError> {
    const FIELD: &str = "confirmPassword";
    if confirm.is_empty() {
        return Some(FieldError::new(FIELD, "Confirm password is required"));
    }
    if confirm != password {
        return Some(FieldError::new(FIELD, "Passwords do not match"));
    }
    None
}
