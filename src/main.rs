use std::sync::Arc;

use color_eyre::Result;
use lites::{
    context::AppContext,
    protocols::{
        http_server::serve,
        https::{mk_hyper_https_client, HyperLifxTransport},
    },
    settings::read_settings,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "lites=info".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();

    let settings = read_settings()?;
    let https_client = mk_hyper_https_client();
    let transport = Arc::new(HyperLifxTransport::new(https_client, &settings.lifx.api_url));

    let ctx = Arc::new(AppContext::new(&settings, transport));

    if !ctx.credentials.is_usable() {
        log::warn!("auth.allowed_emails or auth.shared_password is empty, every login will fail");
    }

    if ctx.lifx.token().is_none() {
        log::warn!("lifx.token is not set, device and scene requests will fail");
    }

    serve(ctx).await
}
