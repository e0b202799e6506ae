//! Inspect and check the contract toolchain configuration.
//!
//! Commands:
//! - `show`: print the resolved configuration (secrets masked by default)
//! - `check`: verify a task's requirements are configured for a network
//! - `accounts`: list the signer addresses derived for a network
//! - `ping`: connect to a network and confirm its chain id

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toolchain::{env::EnvFile, Format, Task};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "toolchain")]
#[command(about = "Resolve and check contract toolchain configuration")]
struct Cli {
    /// Dotenv file layered under the process environment (default: .env)
    #[arg(long, env = "TOOLCHAIN_ENV_FILE", conflicts_with = "no_env_file")]
    env_file: Option<PathBuf>,

    /// Ignore dotenv files and read only the process environment
    #[arg(long)]
    no_env_file: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resolved configuration
    Show {
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Print secrets instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Check that a task (compile, deploy, verify) is fully configured
    Check {
        task: Task,

        #[arg(short, long)]
        network: Option<String>,
    },

    /// List signer addresses derived for a network
    Accounts {
        #[arg(short, long)]
        network: String,
    },

    /// Connect to a network and confirm its chain id
    Ping {
        #[arg(short, long)]
        network: String,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let env_file = match (cli.no_env_file, cli.env_file) {
        (true, _) => EnvFile::Disabled,
        (false, Some(path)) => EnvFile::Path(path),
        (false, None) => EnvFile::Default,
    };

    let config = toolchain::load_config(&env_file)?;

    match cli.command {
        Command::Show { format, reveal } => {
            println!("{}", toolchain::render(&config, format, reveal)?);
        }
        Command::Check { task, network } => {
            toolchain::check(&config, task, network.as_deref())?;
            println!("{task}: ok");
        }
        Command::Accounts { network } => {
            for (i, address) in toolchain::accounts(&config, &network)?.iter().enumerate() {
                println!("{i}: {address}");
            }
        }
        Command::Ping { network } => {
            let chain_id = toolchain::ping(&config, &network).await?;
            info!(network = %network, chain_id, "Endpoint reachable");
            println!("{network}: chain id {chain_id}");
        }
    }

    Ok(())
}
