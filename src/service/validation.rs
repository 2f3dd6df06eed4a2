//! Syntactic checks on client-supplied identifiers and numbers.

use crate::error::AppError;
use regex::Regex;
use std::sync::OnceLock;

fn digits() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"^[0-9]+$").expect("static pattern"))
}

pub struct IdValidator;

impl IdValidator {
    /// True when `raw` is an unsigned decimal literal.
    pub fn is_well_formed(raw: &str) -> bool {
        digits().is_match(raw)
    }

    /// Parse an `article_id` / `comment_id` path segment.
    ///
    /// Anything that is not a decimal literal fitting the id column is a format
    /// error; whether the row exists is decided later by the repository.
    pub fn parse(raw: &str) -> Result<i32, AppError> {
        if !Self::is_well_formed(raw) {
            return Err(AppError::InvalidFormat);
        }
        raw.parse().map_err(|_| AppError::InvalidFormat)
    }

    /// Parse an optional unsigned query number, falling back to `default` when absent.
    pub fn parse_count(raw: Option<&str>, default: i64) -> Result<i64, AppError> {
        match raw {
            None => Ok(default),
            Some(s) if Self::is_well_formed(s) => s.parse().map_err(|_| AppError::InvalidFormat),
            Some(_) => Err(AppError::InvalidFormat),
        }
    }
}
