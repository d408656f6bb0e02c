use std::net::SocketAddr;

use serde::Deserialize;

pub const DEFAULT_SELECTOR: &str = "all";
pub const DEFAULT_LIFX_API_URL: &str = "https://api.lifx.com/v1";

#[derive(Clone, Deserialize, Debug)]
pub struct HttpSettings {
    pub bind: SocketAddr,
    pub secure_cookies: bool,
    pub static_dir: String,
}

#[derive(Clone, Deserialize, Debug)]
pub struct AuthSettings {
    /// Comma separated list of emails allowed to log in
    pub allowed_emails: String,
    pub shared_password: String,
}

#[derive(Clone, Deserialize, Debug)]
pub struct LifxSettings {
    pub token: Option<String>,
    pub default_selector: Option<String>,
    pub api_url: String,
}

impl LifxSettings {
    /// Bearer token for the LIFX cloud API. An empty value counts as missing.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn default_selector(&self) -> &str {
        self.default_selector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SELECTOR)
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct Settings {
    pub http: HttpSettings,
    pub auth: AuthSettings,
    pub lifx: LifxSettings,
}

pub fn read_settings() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .set_default("http.bind", "127.0.0.1:3000")?
        .set_default("http.secure_cookies", false)?
        .set_default("http.static_dir", "public")?
        .set_default("auth.allowed_emails", "")?
        .set_default("auth.shared_password", "")?
        .set_default("lifx.api_url", DEFAULT_LIFX_API_URL)?
        .add_source(config::File::with_name("Settings").required(false))
        .add_source(
            config::Environment::with_prefix("LITES")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<Settings>()
}
