#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least 8 characters")]
    TooShort,

    #[error("Password must not exceed 128 characters")]
    TooLong,

    #[error("Password must contain at least one letter and one digit")]
    TooWeak,
}

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

pub fn validate_password(password: &str) -> Result<(), PasswordPolicyError> {
    let len = password.chars().count();

    if len < MIN_PASSWORD_LEN {
        return Err(PasswordPolicyError::TooShort);
    }

    if len > MAX_PASSWORD_LEN {
        return Err(PasswordPolicyError::TooLong);
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_letter || !has_digit {
        return Err(PasswordPolicyError::TooWeak);
    }

    Ok(())
}
