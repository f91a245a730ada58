//! Password length policy for new accounts.

use foodshare_core::error::AppError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum accepted password length, in characters.
pub const MAX_PASSWORD_LEN: usize = 72;

/// Validates new passwords against the length bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Returns `Ok(())` if the password is acceptable.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let len = password.chars().count();
        if len < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        if len > MAX_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at most {MAX_PASSWORD_LEN} characters long"
            )));
        }
        Ok(())
    }
}
