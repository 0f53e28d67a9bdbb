//! Session module - login markers, roles and credential form rules.

mod credentials;
mod record;

pub use credentials::{strength_label, CredentialError, LoginForm, PasswordStrength, SignUpForm};
pub use record::{Role, SessionRecord, SessionSlot};
