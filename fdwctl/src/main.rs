use clap::Parser;
use tracing::error;

use fdwctl::cli::{self, Cli};
use fdwctl::logger;

#[tokio::main]
async fn main() {
    logger::setup();

    let cli = Cli::parse();

    if let Err(err) = cli::run(cli).await {
        error!("{}", err);
        std::process::exit(1);
    }
}
