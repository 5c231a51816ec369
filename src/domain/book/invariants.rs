use std::sync::OnceLock;

use regex::Regex;

use super::entity::Book;
use crate::domain::{DomainError, DomainResult};

fn isbn10_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{9}[0-9X]$").expect("valid ISBN-10 pattern"))
}

fn isbn13_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{13}$").expect("valid ISBN-13 pattern"))
}

/// Strip spaces and hyphens, upper-case the ISBN-10 check character
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// An ISBN must be 10 characters (last may be `X`) or 13 digits once normalised
pub fn validate_isbn(raw: &str) -> DomainResult<String> {
    let isbn = normalize_isbn(raw);
    if isbn10_pattern().is_match(&isbn) || isbn13_pattern().is_match(&isbn) {
        Ok(isbn)
    } else {
        Err(DomainError::InvalidIsbn(raw.to_string()))
    }
}

/// Validates all Book invariants
pub fn validate_book(book: &Book) -> DomainResult<()> {
    if book.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Book title cannot be empty".to_string(),
        ));
    }
    for isbn in [&book.isbn10, &book.isbn13].into_iter().flatten() {
        validate_isbn(isbn)?;
    }
    Ok(())
}
