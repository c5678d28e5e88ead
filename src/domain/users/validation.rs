use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid username regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid url regex"));

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 7;
pub const PASSWORD_MAX: usize = 100;
/// bcrypt ignores everything past this many bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;
pub const RESET_MESSAGE_MIN: usize = 2;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(ValidationError::new(
            "username",
            format!("must be between {USERNAME_MIN} and {USERNAME_MAX} characters"),
        ));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(ValidationError::new(
            "username",
            "may only contain letters, digits, '_' and '-'",
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        return Err(ValidationError::new(
            "password",
            format!("must be between {PASSWORD_MIN} and {PASSWORD_MAX} characters"),
        ));
    }
    if password.len() > PASSWORD_MAX_BYTES {
        return Err(ValidationError::new(
            "password",
            format!("must be at most {PASSWORD_MAX_BYTES} bytes"),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::new("email", "not a valid email address"))
    }
}

pub fn validate_image_url(url: &str) -> Result<(), ValidationError> {
    validate_http_url("image", url)
}

pub fn validate_http_url(field: &'static str, url: &str) -> Result<(), ValidationError> {
    if URL_RE.is_match(url) {
        Ok(())
    } else {
        Err(ValidationError::new(field, "must be an http(s) URL"))
    }
}

pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

pub fn validate_reset_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().chars().count() < RESET_MESSAGE_MIN {
        return Err(ValidationError::new(
            "message",
            format!("must be at least {RESET_MESSAGE_MIN} characters"),
        ));
    }
    Ok(())
}
