//! `serve` command handler.

use storyteller::{Secrets, StorytellerConfig, StorytellerResult, build_state, serve};
use tracing::info;

/// Start the HTTP service and run until Ctrl-C.
pub async fn serve_command(
    config: StorytellerConfig,
    secrets: &Secrets,
    host: Option<String>,
    port: Option<u16>,
) -> StorytellerResult<()> {
    let server = config.server().clone().with_address(host, port);
    let config = config.with_server(server);

    let state = build_state(&config, secrets)?;

    info!(
        address = %config.server().address(),
        database = %config.database().url(),
        "Starting storyteller service"
    );
    serve(state, config.server()).await
}
