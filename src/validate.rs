//! Form checks shared by the add form and the detail editor. Failures are
//! advisory field messages; nothing here is fatal.
//!
//! [`validate_password`] is library API for signup-style account forms. The
//! CLI has no account prompts and does not call it.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationErrors;
use crate::models::NewLead;

pub const MIN_PASSWORD_LEN: usize = 8;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// Loose shape check: something, `@`, something, `.`, something.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

pub fn validate_new_lead(lead: &NewLead) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_name(&mut errors, &lead.name);
    check_email(&mut errors, &lead.email);
    check_source(&mut errors, &lead.source);
    errors.into_result()
}

/// Checks for an edited lead's required fields.
pub fn validate_lead_fields(name: &str, email: &str, source: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_name(&mut errors, name);
    check_email(&mut errors, email);
    check_source(&mut errors, source);
    errors.into_result()
}

/// Signup password rules: minimum length and matching confirmation.
pub fn validate_password(password: &str, confirm: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
    if password != confirm {
        errors.add("confirmPassword", "Passwords do not match");
    }
    errors.into_result()
}

fn check_name(errors: &mut ValidationErrors, name: &str) {
    if name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Please enter a valid email");
    }
}

fn check_source(errors: &mut ValidationErrors, source: &str) {
    if source.trim().is_empty() {
        errors.add("source", "Source is required");
    }
}
