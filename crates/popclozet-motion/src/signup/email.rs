//! Email address shape check

use serde::Serialize;
use crate::error::SignupError;

/// A trimmed address of the form `local@domain`.
///
/// Only the shape a browser's `type="email"` input enforces is checked;
/// deliverability is the sink's concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(input: &str) -> Result<Self, SignupError> {
        let trimmed = input.trim();
        let invalid = || SignupError::InvalidEmail(trimmed.to_string());

        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
            return Err(invalid());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert_eq!(EmailAddress::parse("  ada@example.com ").unwrap().as_str(), "ada@example.com");
        assert!(EmailAddress::parse("first.last+tag@sub.example.co").is_ok());
        assert!(EmailAddress::parse("root@localhost").is_ok());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        for bad in ["ada", "@example.com", "ada@", "a@b@c", "ada @example.com", "ada@.com", "ada@example..com"] {
            assert!(EmailAddress::parse(bad).is_err(), "{bad} should be rejected");
        }
    }
}
