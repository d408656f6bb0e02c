use std::collections::HashSet;

use crate::settings::AuthSettings;

/// Emails allowed to log in plus the password they all share. Built once at
/// start-up and never changed afterwards.
#[derive(Clone, Debug)]
pub struct CredentialSet {
    allowed_emails: HashSet<String>,
    shared_password: String,
}

impl CredentialSet {
    pub fn new<I, S>(allowed_emails: I, shared_password: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_emails = allowed_emails
            .into_iter()
            .map(|email| normalize_email(email.as_ref()))
            .filter(|email| !email.is_empty())
            .collect();

        CredentialSet {
            allowed_emails,
            shared_password: shared_password.into(),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        CredentialSet::new(
            settings.allowed_emails.split(','),
            settings.shared_password.clone(),
        )
    }

    /// A set without emails or without a password can never authenticate.
    pub fn is_usable(&self) -> bool {
        !self.allowed_emails.is_empty() && !self.shared_password.is_empty()
    }

    pub fn validate(&self, email: &str, password: &str) -> bool {
        // An unset password must not match an empty submission
        if self.shared_password.is_empty() {
            return false;
        }

        self.allowed_emails.contains(&normalize_email(email)) && password == self.shared_password
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
