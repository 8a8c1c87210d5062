//! Field checks shared by every registry entity.
//!
//! All domain failures surface as a [`ValidationError`]; the interactive shell turns
//! them into an `Error: ...` line and asks again.

/// Invalid-argument failure raised by setters, constructors, and registries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid number format. Please enter a valid {expected}.")]
    NumberFormat { expected: &'static str },
    #[error("Invalid date format. Please use {pattern} format.")]
    DateFormat { pattern: &'static str },
}

impl ValidationError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Trim `value` and reject it when nothing is left.
pub fn require_text(value: &str, field: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::rejected(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

pub fn require_email(value: &str) -> Result<String, ValidationError> {
    let email = require_text(value, "Email")?;
    if !email.contains('@') {
        return Err(ValidationError::rejected("Email must contain '@'"));
    }
    Ok(email)
}

pub fn require_positive(value: f64, message: &str) -> Result<f64, ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::rejected(message));
    }
    Ok(value)
}

pub fn require_non_negative(value: f64, message: &str) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::rejected(message));
    }
    Ok(value)
}

pub fn parse_int(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::rejected("Input cannot be empty"));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NumberFormat {
            expected: "integer",
        })
}

pub fn parse_decimal(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::rejected("Input cannot be empty"));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NumberFormat { expected: "number" }),
    }
}

/// Accepts the yes/no spellings the console prompts advertise.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
