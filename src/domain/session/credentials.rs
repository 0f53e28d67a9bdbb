//! Login and sign-up form rules.
//!
//! No credential is verified anywhere; these rules only gate form submission.
//! Passwords are held as `SecretString` and never persisted or logged.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Password strength on a 0-4 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordStrength(u8);

impl PasswordStrength {
    /// Scores a password: one point each for length >= 8, mixed case,
    /// a digit and a symbol.
    pub fn evaluate(password: &str) -> Self {
        let checks = [
            password.chars().count() >= 8,
            password.chars().any(|c| c.is_ascii_lowercase())
                && password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];
        Self(checks.iter().filter(|passed| **passed).count() as u8)
    }

    pub fn score(&self) -> u8 {
        self.0
    }

    /// Meter label. A non-empty password that scores zero still reads "Weak".
    pub fn label(&self) -> &'static str {
        match self.0 {
            0 | 1 => "Weak",
            2 => "Fair",
            3 => "Good",
            _ => "Strong",
        }
    }
}

/// Label for the strength meter, empty when nothing has been typed.
pub fn strength_label(password: &str) -> &'static str {
    if password.is_empty() {
        ""
    } else {
        PasswordStrength::evaluate(password).label()
    }
}

/// Reasons a form submission is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Please agree to the terms and conditions")]
    TermsNotAccepted,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Login form contents.
#[derive(Debug)]
pub struct LoginForm {
    pub identifier: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Both fields must be filled in.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.identifier.trim().is_empty() {
            return Err(CredentialError::MissingField("ID"));
        }
        if self.password.expose_secret().is_empty() {
            return Err(CredentialError::MissingField("Password"));
        }
        Ok(())
    }
}

/// Sign-up form contents.
#[derive(Debug)]
pub struct SignUpForm {
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub agree_to_terms: bool,
}

impl SignUpForm {
    /// Checks the form in the order the page does: email, terms, then the
    /// password confirmation.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.email.trim().is_empty() {
            return Err(CredentialError::MissingField("Email"));
        }
        if !self.agree_to_terms {
            return Err(CredentialError::TermsNotAccepted);
        }
        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            return Err(CredentialError::PasswordMismatch);
        }
        Ok(())
    }

    pub fn strength(&self) -> PasswordStrength {
        PasswordStrength::evaluate(self.password.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, confirm: &str, terms: bool) -> SignUpForm {
        SignUpForm {
            email: "sam@example.com".to_string(),
            password: SecretString::new(password.to_string()),
            confirm_password: SecretString::new(confirm.to_string()),
            agree_to_terms: terms,
        }
    }

    #[test]
    fn strength_counts_each_rule() {
        assert_eq!(PasswordStrength::evaluate("abc").score(), 0);
        assert_eq!(PasswordStrength::evaluate("abcdefgh").score(), 1);
        assert_eq!(PasswordStrength::evaluate("abcdEFGH").score(), 2);
        assert_eq!(PasswordStrength::evaluate("abcdEFG1").score(), 3);
        assert_eq!(PasswordStrength::evaluate("abcdEF1!").score(), 4);
    }

    #[test]
    fn strength_labels() {
        assert_eq!(strength_label(""), "");
        assert_eq!(strength_label("abc"), "Weak");
        assert_eq!(strength_label("abcdEFGH"), "Fair");
        assert_eq!(strength_label("abcdEFG1"), "Good");
        assert_eq!(strength_label("abcdEF1!"), "Strong");
    }

    #[test]
    fn terms_are_checked_before_password_match() {
        let err = signup("a", "b", false).validate().unwrap_err();
        assert_eq!(err.to_string(), "Please agree to the terms and conditions");
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let err = signup("Secret1!", "Secret2!", true).validate().unwrap_err();
        assert_eq!(err, CredentialError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn complete_signup_passes() {
        let form = signup("Secret1!", "Secret1!", true);
        assert!(form.validate().is_ok());
        assert_eq!(form.strength().label(), "Strong");
    }

    #[test]
    fn login_form_requires_both_fields() {
        assert_eq!(
            LoginForm::new("", "pw").validate(),
            Err(CredentialError::MissingField("ID"))
        );
        assert_eq!(
            LoginForm::new("DOC-1", "").validate(),
            Err(CredentialError::MissingField("Password"))
        );
        assert!(LoginForm::new("DOC-1", "pw").validate().is_ok());
    }

    #[test]
    fn debug_output_hides_password() {
        let form = LoginForm::new("DOC-1", "hunter2");
        assert!(!format!("{:?}", form).contains("hunter2"));
    }
}
