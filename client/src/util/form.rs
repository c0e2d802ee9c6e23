//! Transient submit state shared by the auth forms.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::fmt::Display;

pub const LOGIN_FALLBACK: &str = "Failed to login";
pub const SIGNUP_FALLBACK: &str = "Signup failed";
pub const SIGNUP_CONFIRMATION: &str = "Check your email for the confirmation link!";

/// Submit-in-progress flag plus the error or info line under a form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl FormStatus {
    /// Start a submission: disable the button and clear previous output.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.message = None;
    }

    /// Record a failure, using `fallback` when the error has no message.
    pub fn fail<E: Display + ?Sized>(&mut self, err: &E, fallback: &str) {
        let text = err.to_string();
        self.error = Some(if text.trim().is_empty() { fallback.to_owned() } else { text });
        self.loading = false;
    }

    pub fn succeed(&mut self, message: Option<&str>) {
        self.loading = false;
        self.message = message.map(str::to_owned);
    }
}
