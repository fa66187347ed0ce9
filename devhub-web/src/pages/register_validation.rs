//! Validation rules for the registration form.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

/// A field that failed validation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValidationError {
    Required,
    UsernameTooShort,
    InvalidEmail,
    PasswordTooShort,
    PasswordsDoNotMatch,
}

impl ValidationError {
    /// Translation key of the message shown under the field.
    #[must_use]
    pub fn message_key(self) -> &'static str {
        match self {
            Self::Required => "register.errors.required",
            Self::UsernameTooShort => "register.errors.username_too_short",
            Self::InvalidEmail => "register.errors.invalid_email",
            Self::PasswordTooShort => "register.errors.password_too_short",
            Self::PasswordsDoNotMatch => "register.errors.passwords_do_not_match",
        }
    }
}

/// Field values as typed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Per-field outcome; every field `None` means the form can be submitted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors {
    pub email: Option<ValidationError>,
    pub username: Option<ValidationError>,
    pub password: Option<ValidationError>,
    pub confirm_password: Option<ValidationError>,
}

impl FormErrors {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.email.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }
}

impl RegistrationForm {
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        FormErrors {
            email: validate_email(&self.email).err(),
            username: validate_username(&self.username).err(),
            password: validate_password(&self.password).err(),
            confirm_password: validate_confirm_password(&self.confirm_password, &self.password)
                .err(),
        }
    }
}

/// Usernames are trimmed and need at least [`MIN_USERNAME_LEN`] characters.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    if trimmed.chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    let matches = EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(trimmed));
    if !matches {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_confirm_password(
    confirm_password: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if confirm_password.is_empty() {
        return Err(ValidationError::Required);
    }
    if confirm_password != password {
        return Err(ValidationError::PasswordsDoNotMatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames() {
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("user_123").is_ok());
        assert_eq!(validate_username("   "), Err(ValidationError::Required));
        assert_eq!(
            validate_username("  ab  "),
            Err(ValidationError::UsernameTooShort)
        );
    }

    #[test]
    fn emails() {
        assert!(validate_email("user.name+tag@example.com").is_ok());
        assert!(validate_email("  padded@example.org ").is_ok());
        assert_eq!(validate_email(""), Err(ValidationError::Required));
        for invalid in ["userexample.com", "@example.com", "user@example", "a b@c.de"] {
            assert_eq!(
                validate_email(invalid),
                Err(ValidationError::InvalidEmail),
                "{invalid}"
            );
        }
    }

    #[test]
    fn passwords() {
        assert!(validate_password("longenough").is_ok());
        assert_eq!(
            validate_password("short"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(validate_password("        "), Err(ValidationError::Required));
        assert_eq!(
            validate_confirm_password("other", "longenough"),
            Err(ValidationError::PasswordsDoNotMatch)
        );
        assert_eq!(
            validate_confirm_password("", "longenough"),
            Err(ValidationError::Required)
        );
    }

    #[test]
    fn whole_form() {
        let mut form = RegistrationForm {
            email: "dev@example.com".to_string(),
            username: "dev".to_string(),
            password: "hunter2hunter2".to_string(),
            confirm_password: "hunter2hunter2".to_string(),
        };
        assert!(form.validate().is_valid());

        form.confirm_password = "mismatch".to_string();
        form.email = "nope".to_string();
        let errors = form.validate();
        assert!(!errors.is_valid());
        assert_eq!(errors.email, Some(ValidationError::InvalidEmail));
        assert_eq!(
            errors.confirm_password,
            Some(ValidationError::PasswordsDoNotMatch)
        );
        assert_eq!(errors.username, None);
    }

    #[test]
    fn every_error_has_a_message_key() {
        for error in [
            ValidationError::Required,
            ValidationError::UsernameTooShort,
            ValidationError::InvalidEmail,
            ValidationError::PasswordTooShort,
            ValidationError::PasswordsDoNotMatch,
        ] {
            assert!(error.message_key().starts_with("register.errors."));
        }
    }
}
