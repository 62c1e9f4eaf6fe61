use std::sync::Arc;

use color_eyre::Result;
use tracing_subscriber::{fmt, EnvFilter};

use splitpay::adapters::{HeadlessPushPlatform, UnavailableGoogleSdk};
use splitpay::cli::{parse_args, run_cli_command, run_local_command};
use splitpay::startup::{ClientConfig, ClientServices};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("splitpay=info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args())?;
    // Version and help print before logging or storage are touched
    if run_local_command(&command) {
        return Ok(());
    }

    init_tracing();

    let config = ClientConfig::from_env()?;
    tracing::debug!(api = %config.api_base_url, "Starting splitpay");

    // No mobile SDKs on a desktop host
    let services = ClientServices::build(
        &config,
        Arc::new(UnavailableGoogleSdk),
        Arc::new(HeadlessPushPlatform),
    )?;
    services.start().await;

    let result = run_cli_command(command, &services.controller).await;
    services.shutdown().await;
    result
}
