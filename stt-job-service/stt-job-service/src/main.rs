use anyhow::Result;
use stt_configuration::{load_config, setup_logging};
use stt_setup::build_and_run;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    setup_logging(&config);
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "starting stt job service"
    );

    let server_config = config.server.clone();
    build_and_run(config, server_config).await?;
    Ok(())
}
