use clap::Parser;
use credit_simulator::logging::init_logging;
use credit_simulator::server::run_server;
use credit_simulator::{CliArgs, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = ServerConfig::from_args(args)?;

    init_logging(config.log_format, config.verbose);
    tracing::info!(bands = config.rates.bands().len(), "starting credit-simulator");

    run_server(config).await
}
