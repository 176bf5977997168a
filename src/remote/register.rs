//! Account registration form validation and outcome types.

use std::fmt;

use super::dto::RegisterRequestDto;

pub const GENERIC_REGISTER_FAILURE: &str = "an error occurred";

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("all fields are required")]
    MissingFields,
    #[error("passwords do not match")]
    PasswordMismatch,
    /// Server refused the registration; `message` is shown to the user as-is.
    #[error("{message}")]
    Rejected { message: String },
    /// The request never got an answer. Shown as the generic failure; the cause is kept as source.
    #[error("{}", GENERIC_REGISTER_FAILURE)]
    Transport(#[from] reqwest::Error),
    #[error("registration response carried no session token")]
    MissingSession,
}

/// Raw form input, including the confirmation field.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Checks required fields, then the password confirmation.
    pub fn validate(&self) -> Result<RegisterRequestDto, RegisterError> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(RegisterError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(RegisterError::PasswordMismatch);
        }
        Ok(RegisterRequestDto {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// Session issued on successful registration.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub jwt: String,
    pub user_id: Option<u64>,
    pub username: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
