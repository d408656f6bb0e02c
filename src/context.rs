use std::sync::Arc;

use crate::{
    api::error::ApiError,
    auth::credentials::CredentialSet,
    protocols::https::LifxTransport,
    settings::{HttpSettings, LifxSettings, Settings},
};

/// Immutable per-process state handed to every request.
pub struct AppContext {
    pub http: HttpSettings,
    pub lifx: LifxSettings,
    pub credentials: CredentialSet,
    pub transport: Arc<dyn LifxTransport>,
}

impl AppContext {
    pub fn new(settings: &Settings, transport: Arc<dyn LifxTransport>) -> Self {
        AppContext {
            http: settings.http.clone(),
            lifx: settings.lifx.clone(),
            credentials: CredentialSet::from_settings(&settings.auth),
            transport,
        }
    }

    /// Token for outbound calls. Checked before anything is sent.
    pub fn lifx_token(&self) -> Result<&str, ApiError> {
        self.lifx.token().ok_or(ApiError::MissingToken)
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::settings::{AuthSettings, DEFAULT_LIFX_API_URL};

    pub fn test_settings(token: Option<&str>) -> Settings {
        Settings {
            http: HttpSettings {
                bind: ([127, 0, 0, 1], 0).into(),
                secure_cookies: false,
                static_dir: "does-not-exist".to_string(),
            },
            auth: AuthSettings {
                allowed_emails: "alice@example.com".to_string(),
                shared_password: "hunter2".to_string(),
            },
            lifx: LifxSettings {
                token: token.map(String::from),
                default_selector: None,
                api_url: DEFAULT_LIFX_API_URL.to_string(),
            },
        }
    }

    pub fn test_context(token: Option<&str>, transport: Arc<dyn LifxTransport>) -> AppContext {
        AppContext::new(&test_settings(token), transport)
    }
}
