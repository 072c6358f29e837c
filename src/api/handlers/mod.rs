//! API handlers and shared utilities for DevLinks.
//!
//! This module organizes the service's route handlers and provides common
//! functions for input validation.

pub mod auth;
pub mod health;
pub mod profile;
pub mod root;

use regex::Regex;

/// Lightweight email sanity check used by auth handlers before persisting data.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Usernames may only contain letters, digits, and underscores.
/// They are lowercased before storage so uniqueness is case-insensitive.
pub fn valid_username(username: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9_]+$").is_ok_and(|re| re.is_match(username))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
        assert!(!valid_email("spaces in@example.com"));
    }

    #[test]
    fn valid_username_accepts_word_characters() {
        assert!(valid_username("kishan"));
        assert!(valid_username("Kishan_01"));
        assert!(valid_username("_"));
    }

    #[test]
    fn valid_username_rejects_punctuation_and_empty() {
        assert!(!valid_username(""));
        assert!(!valid_username("with space"));
        assert!(!valid_username("dash-ed"));
        assert!(!valid_username("dot.ted"));
        assert!(!valid_username("émoji"));
    }
}
