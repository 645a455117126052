// SPDX-License-Identifier: GPL-3.0-only

//! Login and registration forms.

use crate::app_settings::MIN_PASSWORD_LEN;
use crate::error::ValidationError;

/// Email and password, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl LoginForm {
    /// Checks the form and returns the credentials to sign in with.
    pub fn submit(&mut self) -> Result<Credentials, ValidationError> {
        let result = credentials(&self.email, &self.password);
        self.track(&result);
        result
    }

    /// Records the outcome of a sign-in request.
    pub fn finish(&mut self, error: Option<String>) {
        self.loading = false;
        self.error = error;
        if self.error.is_none() {
            self.password.clear();
        }
    }

    fn track(&mut self, result: &Result<Credentials, ValidationError>) {
        self.loading = result.is_ok();
        self.error = result.as_ref().err().map(ToString::to_string);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl RegisterForm {
    /// Checks the form and returns the credentials to register.
    pub fn submit(&mut self) -> Result<Credentials, ValidationError> {
        let result = credentials(&self.email, &self.password).and_then(|creds| {
            if self.password != self.confirm_password {
                return Err(ValidationError::PasswordMismatch);
            }
            if self.password.chars().count() < MIN_PASSWORD_LEN {
                return Err(ValidationError::PasswordTooShort {
                    min: MIN_PASSWORD_LEN,
                });
            }
            Ok(creds)
        });

        self.loading = result.is_ok();
        self.error = result.as_ref().err().map(ToString::to_string);
        result
    }

    pub fn finish(&mut self, error: Option<String>) {
        self.loading = false;
        self.error = error;
        if self.error.is_none() {
            self.password.clear();
            self.confirm_password.clear();
        }
    }
}

fn credentials(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}
