//! Registration input validation.
//!
//! Validation runs locally before the registration request so obviously-bad
//! input never reaches the auth service.

use monsoon_core::Email;

use super::AuthError;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// New-account registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Registration {
    /// Validate the input, returning the parsed email on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `AuthError::WeakPassword`, or
    /// `AuthError::PasswordMismatch`.
    pub(crate) fn validate(&self) -> Result<Email, AuthError> {
        let email = Email::parse(self.email.trim())?;
        validate_password(&self.password)?;
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(email)
    }
}

/// Validate password strength: 8+ characters with an upper-case letter, a
/// lower-case letter, a digit, and a non-alphanumeric character.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(
            "password must be at least 8 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AuthError::WeakPassword(
            "password must contain an upper-case letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(AuthError::WeakPassword(
            "password must contain a lower-case letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword("password must contain a digit"));
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(AuthError::WeakPassword(
            "password must contain a special character",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(password: &str, confirm: &str) -> Registration {
        Registration {
            email: "jane@example.com".to_owned(),
            password: password.to_owned(),
            confirm_password: confirm.to_owned(),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(registration("Secret#123", "Secret#123").validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let mut reg = registration("Secret#123", "Secret#123");
        reg.email = "not-an-email".to_owned();
        assert!(matches!(
            reg.validate(),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_password_mismatch() {
        assert!(matches!(
            registration("Secret#123", "Secret#124").validate(),
            Err(AuthError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_weak_passwords() {
        // Too short, no upper case, no lower case, no digit, no special.
        for password in ["Ab1#", "secret#123", "SECRET#123", "Secretary#", "Secret1234"] {
            assert!(
                matches!(
                    registration(password, password).validate(),
                    Err(AuthError::WeakPassword(_))
                ),
                "expected {password:?} to be rejected"
            );
        }
    }
}
