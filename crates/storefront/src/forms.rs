//! Contact and admin login form validation.
//!
//! Raw form bodies are deserialized leniently (every field defaults to empty)
//! and then validated into typed submissions. Failures are collected per
//! field so the page can show every problem at once.

use std::fmt;
use std::sync::LazyLock;

use hafiz_sajid_core::Email;
use regex::Regex;
use secrecy::SecretString;
use serde::Deserialize;

use crate::content::{self, Department};

pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_MESSAGE_LENGTH: usize = 10;
pub const MIN_PASSWORD_LENGTH: usize = 6;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .expect("phone pattern is a valid regex")
});

static LOGIN_EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("login email pattern is a valid regex"));

// =============================================================================
// Contact Form
// =============================================================================

/// How the visitor wants to be contacted back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreferredContact {
    #[default]
    Email,
    Phone,
    Both,
}

impl PreferredContact {
    pub const ALL: [Self; 3] = [Self::Email, Self::Phone, Self::Both];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Both => "both",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Both => "Both",
        }
    }

    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Email => "✉️",
            Self::Phone => "📞",
            Self::Both => "🤝",
        }
    }

    /// Parse a radio value; anything unrecognised means email.
    #[must_use]
    pub fn from_form(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|choice| choice.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for PreferredContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw contact form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub preferred_contact: String,
    #[serde(default)]
    pub department: String,
}

/// A contact message that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub preferred_contact: PreferredContact,
    pub department: &'static Department,
}

/// Per-field contact form errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub subject: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl ContactErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.subject.is_none()
            && self.message.is_none()
    }
}

impl ContactForm {
    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the per-field errors when any field is invalid.
    pub fn validate(&self) -> Result<ContactSubmission, ContactErrors> {
        let mut errors = ContactErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.name = Some("Name is required");
        } else if name.chars().count() < MIN_NAME_LENGTH {
            errors.name = Some("Name must be at least 3 characters");
        }

        let email = self.email.trim();
        let parsed_email = if email.is_empty() {
            errors.email = Some("Email is required");
            None
        } else {
            let parsed = Email::parse(email).ok();
            if parsed.is_none() {
                errors.email = Some("Please enter a valid email address");
            }
            parsed
        };

        let phone = self.phone.trim();
        if !phone.is_empty() && !PHONE_PATTERN.is_match(phone) {
            errors.phone = Some("Please enter a valid phone number");
        }

        let subject = self.subject.trim();
        if subject.is_empty() {
            errors.subject = Some("Subject is required");
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.message = Some("Message is required");
        } else if message.chars().count() < MIN_MESSAGE_LENGTH {
            errors.message = Some("Message must be at least 10 characters");
        }

        match parsed_email {
            Some(email) if errors.is_empty() => Ok(ContactSubmission {
                name: name.to_string(),
                email,
                phone: (!phone.is_empty()).then(|| phone.to_string()),
                subject: subject.to_string(),
                message: message.to_string(),
                preferred_contact: PreferredContact::from_form(&self.preferred_contact),
                department: content::department(&self.department),
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Admin Login Form
// =============================================================================

/// Raw admin login form body.
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox: present (any value) when ticked.
    #[serde(default)]
    pub remember_me: Option<String>,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Login credentials that passed validation.
#[derive(Debug, Clone)]
pub struct LoginSubmission {
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
}

/// Per-field login errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }

    /// Errors shown after a rejected login.
    #[must_use]
    pub const fn invalid_credentials() -> Self {
        Self {
            email: Some("Invalid email or password"),
            password: Some("Invalid email or password"),
        }
    }

    /// Errors shown when the check itself failed.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            email: Some("An error occurred. Please try again."),
            password: Some("An error occurred. Please try again."),
        }
    }
}

impl LoginForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the per-field errors when any field is invalid.
    pub fn validate(&self) -> Result<LoginSubmission, LoginErrors> {
        let mut errors = LoginErrors::default();

        if self.email.is_empty() {
            errors.email = Some("Email is required");
        } else if !LOGIN_EMAIL_PATTERN.is_match(&self.email) {
            errors.email = Some("Please enter a valid email address");
        }

        if self.password.is_empty() {
            errors.password = Some("Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.password = Some("Password must be at least 6 characters");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LoginSubmission {
            email: self.email.trim().to_string(),
            password: SecretString::from(self.password.clone()),
            remember_me: self.remember_me.is_some(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn valid_contact() -> ContactForm {
        ContactForm {
            name: "Sara Ahmed".to_string(),
            email: "sara@example.com".to_string(),
            phone: "300-123-4567".to_string(),
            subject: "Vaccine schedule".to_string(),
            message: "When should broilers get the Newcastle vaccine?".to_string(),
            preferred_contact: "phone".to_string(),
            department: "products".to_string(),
        }
    }

    #[test]
    fn test_valid_contact_form() {
        let submission = valid_contact().validate().unwrap();
        assert_eq!(submission.email.as_str(), "sara@example.com");
        assert_eq!(submission.phone.as_deref(), Some("300-123-4567"));
        assert_eq!(submission.preferred_contact, PreferredContact::Phone);
        assert_eq!(submission.department.id, "products");
    }

    #[test]
    fn test_empty_contact_form_reports_every_required_field() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(errors.name, Some("Name is required"));
        assert_eq!(errors.email, Some("Email is required"));
        assert_eq!(errors.phone, None);
        assert_eq!(errors.subject, Some("Subject is required"));
        assert_eq!(errors.message, Some("Message is required"));
    }

    #[test]
    fn test_contact_minimum_lengths() {
        let form = ContactForm {
            name: "Al".to_string(),
            message: "Too short".to_string(),
            ..valid_contact()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.name, Some("Name must be at least 3 characters"));
        assert_eq!(errors.message, Some("Message must be at least 10 characters"));
        assert_eq!(errors.email, None);
    }

    #[test]
    fn test_contact_email_shape() {
        for bad in ["farmer", "farmer@lahore", "far mer@lahore.pk", "a@b@c.pk"] {
            let form = ContactForm {
                email: bad.to_string(),
                ..valid_contact()
            };
            assert_eq!(
                form.validate().unwrap_err().email,
                Some("Please enter a valid email address"),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_phone_is_optional_but_checked() {
        let blank = ContactForm {
            phone: String::new(),
            ..valid_contact()
        };
        assert_eq!(blank.validate().unwrap().phone, None);

        for good in ["3001234567", "(300) 123-4567", "300.123.45678", "+300-123-4567"] {
            let form = ContactForm {
                phone: good.to_string(),
                ..valid_contact()
            };
            assert!(form.validate().is_ok(), "{good} should be accepted");
        }

        let bad = ContactForm {
            phone: "call me".to_string(),
            ..valid_contact()
        };
        assert_eq!(
            bad.validate().unwrap_err().phone,
            Some("Please enter a valid phone number")
        );
    }

    #[test]
    fn test_unknown_choices_fall_back() {
        let form = ContactForm {
            preferred_contact: "pigeon".to_string(),
            department: "billing".to_string(),
            ..valid_contact()
        };
        let submission = form.validate().unwrap();
        assert_eq!(submission.preferred_contact, PreferredContact::Email);
        assert_eq!(submission.department.id, "general");
    }

    #[test]
    fn test_login_form() {
        let form = LoginForm {
            email: "admin@hafizsajid.com".to_string(),
            password: "admin123".to_string(),
            remember_me: Some("on".to_string()),
        };
        let submission = form.validate().unwrap();
        assert!(submission.remember_me);
        assert_eq!(submission.password.expose_secret(), "admin123");
    }

    #[test]
    fn test_login_form_errors() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.email, Some("Email is required"));
        assert_eq!(errors.password, Some("Password is required"));

        let form = LoginForm {
            email: "admin".to_string(),
            password: "12345".to_string(),
            remember_me: None,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.email, Some("Please enter a valid email address"));
        assert_eq!(errors.password, Some("Password must be at least 6 characters"));
    }

    #[test]
    fn test_login_form_debug_redacts_password() {
        let form = LoginForm {
            email: "admin@hafizsajid.com".to_string(),
            password: "hunter22".to_string(),
            remember_me: None,
        };
        assert!(!format!("{form:?}").contains("hunter22"));
    }
}
