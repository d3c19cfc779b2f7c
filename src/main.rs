use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use protovarint::cli::{self, Cli};
use protovarint::config::ToolConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ToolConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Configuration: {:?}", config);

    cli::run(cli, config).await
}
