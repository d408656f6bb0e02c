use std::{convert::Infallible, sync::Arc};

use color_eyre::Result;
use hyper::{
    service::{make_service_fn, service_fn},
    Server,
};

use crate::{api::routes::handle_request, context::AppContext};

/// Serves the dashboard until ctrl-c. Every request is handled on its own,
/// sharing nothing but the immutable context.
pub async fn serve(ctx: Arc<AppContext>) -> Result<()> {
    let addr = ctx.http.bind;

    let make_service = make_service_fn(move |_conn| {
        let ctx = ctx.clone();

        async move {
            Ok::<_, Infallible>(service_fn(move |req| handle_request(ctx.clone(), req)))
        }
    });

    let server = Server::try_bind(&addr)?
        .serve(make_service)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for ctrl-c: {e:?}");
            }
        });

    log::info!("Listening on http://{addr}");

    server.await?;

    log::info!("Shut down");

    Ok(())
}
