//! Payload validation
//!
//! Request bodies are normalized and validated before any service call.
//! A failing payload produces one [`FieldError`] per broken rule.

use crate::types::{ContactPayload, FieldError};

pub const MAX_NAME_LEN: usize = 100;
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Types that can be checked before they reach the service layer
pub trait Validate {
    /// Trim and canonicalize input in place
    fn normalize(&mut self) {}

    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

impl Validate for ContactPayload {
    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.phone_number = self.phone_number.trim().to_string();
        self.email = self
            .email
            .take()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(FieldError::new("name", "must not be blank"));
        } else if self.name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                format!("must be at most {} characters", MAX_NAME_LEN),
            ));
        }

        if self.phone_number.is_empty() {
            errors.push(FieldError::new("phoneNumber", "must not be blank"));
        } else if let Err(msg) = check_phone_number(&self.phone_number) {
            errors.push(FieldError::new("phoneNumber", msg));
        }

        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                errors.push(FieldError::new("email", "must be a well-formed email address"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_phone_number(phone: &str) -> Result<(), String> {
    let body = phone.strip_prefix('+').unwrap_or(phone);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' | '.' => {}
            _ => return Err(format!("contains invalid character '{}'", c)),
        }
    }

    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(format!(
            "must contain between {} and {} digits",
            MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
        ));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .filter(|label| !label.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
