use crate::domain::{DomainError, DomainResult};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimal shape check: the address must contain `@` and `.`
pub fn validate_email(email: &str) -> DomainResult<()> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(DomainError::InvalidCredentials("Invalid email".to_string()))
    }
}

pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(DomainError::InvalidCredentials(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )))
    }
}

/// Email is checked first, so a bad email wins over a bad password
pub fn validate_credentials(email: &str, password: &str) -> DomainResult<()> {
    validate_email(email)?;
    validate_password(password)
}
