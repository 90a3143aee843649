use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use fdwctl_config::Config;

use crate::backend::fdw::FdwManager;
use crate::backend::{DryRun, Error, Executor, Server};

/// fdwctl provisions PostgreSQL foreign data wrappers from declarative
/// configuration.
#[derive(Parser, Debug)]
#[command(name = "fdwctl", version)]
pub struct Cli {
    /// Path to the configuration file. Default: "fdwctl.toml"
    #[arg(short, long, default_value = "fdwctl.toml")]
    pub config: PathBuf,
    /// Connection URL. Overrides the [database] section.
    #[arg(short, long)]
    pub database_url: Option<String>,
    /// Subcommand.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create configured foreign servers.
    InitServers {
        /// Print statements, don't execute them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Create user mappings for configured foreign servers.
    CreateUserMappings {
        /// Print statements, don't execute them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Recreate local schemas and import the foreign schemas into them.
    ImportForeignSchema {
        /// Print statements, don't execute them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Create servers, then user mappings, then import foreign schemas.
    Setup {
        /// Print statements, don't execute them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Check the configuration file for errors.
    Configcheck,
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    InitServers,
    CreateUserMappings,
    ImportForeignSchema,
}

impl Operation {
    async fn run<E: Executor>(&self, manager: &mut FdwManager<E>) -> Result<(), Error> {
        match self {
            Self::InitServers => manager.init_servers().await,
            Self::CreateUserMappings => manager.create_user_mappings().await,
            Self::ImportForeignSchema => manager.import_foreign_schema().await,
        }
    }
}

pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Configcheck => {
            Config::load(&cli.config)?;
            info!("configuration ok");
            Ok(())
        }

        Commands::InitServers { dry_run } => {
            single(&cli, Operation::InitServers, *dry_run).await
        }

        Commands::CreateUserMappings { dry_run } => {
            single(&cli, Operation::CreateUserMappings, *dry_run).await
        }

        Commands::ImportForeignSchema { dry_run } => {
            single(&cli, Operation::ImportForeignSchema, *dry_run).await
        }

        Commands::Setup { dry_run } => setup(&cli, *dry_run).await,
    }
}

/// Connection parameters: the --database-url flag wins over the config.
fn params(cli: &Cli, config: &Config) -> String {
    match &cli.database_url {
        Some(url) => url.clone(),
        None => config.database.params(),
    }
}

async fn single(
    cli: &Cli,
    operation: Operation,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(&cli.config)?;

    if dry_run {
        let mut manager = FdwManager::new(config, DryRun);
        operation.run(&mut manager).await?;
    } else {
        let server = Server::connect(&params(cli, &config)).await?;
        let mut manager = FdwManager::new(config, server);
        operation.run(&mut manager).await?;
    }

    Ok(())
}

/// Run all three operations in order. A failed operation is reported and
/// doesn't stop the ones after it.
async fn setup(cli: &Cli, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(&cli.config)?;

    if dry_run {
        let manager = FdwManager::new(config, DryRun);
        return setup_operations(manager).await;
    }

    let server = Server::connect(&params(cli, &config)).await?;
    let manager = FdwManager::new(config, server);

    setup_operations(manager).await
}

async fn setup_operations<E: Executor>(
    mut manager: FdwManager<E>,
) -> Result<(), Box<dyn std::error::Error>> {
    let operations = [
        Operation::InitServers,
        Operation::CreateUserMappings,
        Operation::ImportForeignSchema,
    ];

    let mut failed = false;

    for operation in operations {
        if let Err(err) = operation.run(&mut manager).await {
            error!("{}", err);
            failed = true;
        }
    }

    if failed {
        Err("setup finished with errors".into())
    } else {
        Ok(())
    }
}
