//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace.
    #[error("email cannot contain whitespace")]
    ContainsWhitespace,
    /// The input does not contain exactly one @ symbol.
    #[error("email must contain a single @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The domain has no dot separating two non-empty labels.
    #[error("email domain must contain a dot")]
    MissingDomainDot,
}

/// An email address.
///
/// Accepts the same shape as the storefront's contact form: something
/// without whitespace, a single `@`, and a dotted domain.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - No whitespace anywhere
/// - Exactly one @ symbol, with non-empty local part and domain
/// - Domain contains a `.` that is neither its first nor last character
///
/// ## Examples
///
/// ```
/// use hafiz_sajid_core::Email;
///
/// assert!(Email::parse("info@hafizsajid.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
///
/// assert!(Email::parse("").is_err());             // empty
/// assert!(Email::parse("no-at-symbol").is_err()); // missing @
/// assert!(Email::parse("user@localhost").is_err()); // no dotted domain
/// assert!(Email::parse("a b@c.de").is_err());     // whitespace
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input violates any of the constraints listed
    /// on [`Email`].
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::MissingAtSymbol);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        let last = domain.len() - 1;
        let dotted = domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i < last);
        if !dotted {
            return Err(EmailError::MissingDomainDot);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the local part of the email (before the @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }

    /// Lowercased form used for identity comparisons.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("user@example.com").is_ok());
        assert!(Email::parse("user.name@example.com").is_ok());
        assert!(Email::parse("user+tag@example.com").is_ok());
        assert!(Email::parse("user@subdomain.example.com").is_ok());
        assert!(Email::parse("a@b.c").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(
            Email::parse("farmer @example.com"),
            Err(EmailError::ContainsWhitespace)
        );
    }

    #[test]
    fn test_parse_at_symbol_count() {
        assert_eq!(Email::parse("no-at-symbol"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::parse("a@b@c.com"), Err(EmailError::MissingAtSymbol));
    }

    #[test]
    fn test_parse_empty_parts() {
        assert_eq!(Email::parse("@domain.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("user@"), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_parse_domain_needs_interior_dot() {
        assert_eq!(Email::parse("user@localhost"), Err(EmailError::MissingDomainDot));
        assert_eq!(Email::parse("user@.com"), Err(EmailError::MissingDomainDot));
        assert_eq!(Email::parse("user@com."), Err(EmailError::MissingDomainDot));
    }

    #[test]
    fn test_parts_and_normalized() {
        let email = Email::parse("Admin@HafizSajid.com").unwrap();
        assert_eq!(email.local_part(), "Admin");
        assert_eq!(email.domain(), "HafizSajid.com");
        assert_eq!(email.normalized(), "admin@hafizsajid.com");
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let email = Email::parse("user@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"user@example.com\"");

        let parsed: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, email);
        assert!(serde_json::from_str::<Email>("\"not-an-email\"").is_err());
    }
}
