//! Murmur CLI binary.

use clap::Parser;
use murmur::cli::{Cli, execute};
use murmur::{ObservabilityConfig, init_observability};
use murmur_error::MurmurResult;

#[tokio::main(flavor = "current_thread")]
async fn main() -> MurmurResult<()> {
    // Credentials may live in a .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    init_observability(
        &ObservabilityConfig::new()
            .with_log_level(level)
            .with_json_logs(cli.json_logs)
            .with_log_file(cli.log_file.clone()),
    )?;

    execute(cli).await
}
