use clap::Parser;
use blink::config::Cli;
use blink::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Convert CLI args (layered over blink.toml) to Config - this validates immediately
    let config = Config::try_from(cli)?;
    tracing::debug!("blink v{} with {:?}", blink::VERSION, config);

    blink::commands::sync::run(config).await?;
    Ok(())
}

/// Log to stderr; RUST_LOG overrides the level picked by --verbose.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "blink=debug" } else { "blink=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
