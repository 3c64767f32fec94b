/// Field validators used by the request schemas.
///
/// The `validator` derive covers lengths, emails and numeric ranges. Everything
/// else (closed string sets, "URL or empty") lives here as plain functions that
/// plug into `#[validate(custom(function = "..."))]`.

use std::borrow::Cow;
use validator::ValidationError;

pub const LOCATION_TYPES: &[&str] = &["onsite", "remote", "hybrid"];
pub const EMPLOYMENT_TYPES: &[&str] = &["full-time", "part-time", "contract", "temporary", "internship"];
pub const SALARY_TYPES: &[&str] = &["year", "hour", "project"];
pub const EXPERIENCE_LEVELS: &[&str] = &["entry", "mid", "senior", "executive"];
pub const CONTACT_TYPES: &[&str] = &["general", "employer", "candidate"];
pub const PROFILE_VISIBILITY: &[&str] = &["public", "employers", "private"];
pub const RESUME_VISIBILITY: &[&str] = &["applied", "all", "none"];
pub const JOB_STATUSES: &[&str] = &["draft", "active", "paused", "closed"];
pub const REVIEW_STATUSES: &[&str] = &[
    "new",
    "reviewing",
    "shortlisted",
    "interviewed",
    "offered",
    "hired",
    "rejected",
];

/// Checks that `value` is one of `allowed`
pub fn one_of(value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        return Ok(());
    }

    let mut err = ValidationError::new("invalid_enum");
    err.message = Some(Cow::Owned(format!(
        "Expected one of: {}",
        allowed.join(", ")
    )));
    Err(err)
}

/// Accepts an absolute URL or the empty string
pub fn url_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || url::Url::parse(value).is_ok() {
        return Ok(());
    }

    let mut err = ValidationError::new("url");
    err.message = Some(Cow::Borrowed("Must be a valid URL"));
    Err(err)
}

pub fn location_type(value: &str) -> Result<(), ValidationError> {
    one_of(value, LOCATION_TYPES)
}

pub fn employment_type(value: &str) -> Result<(), ValidationError> {
    one_of(value, EMPLOYMENT_TYPES)
}

pub fn salary_type(value: &str) -> Result<(), ValidationError> {
    one_of(value, SALARY_TYPES)
}

pub fn experience_level(value: &str) -> Result<(), ValidationError> {
    one_of(value, EXPERIENCE_LEVELS)
}

/// Contact form `type`; may be omitted
pub fn contact_type(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    one_of(value, CONTACT_TYPES)
}

/// Error message for a failed check, falling back to the validator code
pub fn message_for(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "length" => match error.params.get("min") {
                Some(min) => format!("Must be at least {} characters", min),
                None => "Invalid length".to_string(),
            },
            "email" => "Must be a valid email address".to_string(),
            "range" => match error.params.get("min") {
                Some(min) => format!("Must be at least {}", min),
                None => "Out of range".to_string(),
            },
            code => format!("Invalid value ({})", code),
        },
    }
}

/// Converts a Rust field name into the camelCase name used on the wire
pub fn wire_name(field: &str) -> String {
    let field = field.strip_prefix("r#").unwrap_or(field);
    let mut out = String::with_capacity(field.len());
    let mut upper = false;

    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }

    out
}
