//! `foamdesk`: inspect and edit OpenFOAM case dictionaries.
//!
//! Usage:
//!   foamdesk create <case>
//!   foamdesk get <case> system/fvSolution solvers/p/tolerance
//!   foamdesk set <case> system/controlDict endTime 2000

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use config::ClientConfig;

/// OpenFOAM case dictionary tool.
#[derive(Parser, Debug)]
#[command(name = "foamdesk", about = "OpenFOAM case dictionary tool")]
struct Cli {
    /// Path to client config file (default: ~/.foamdesk/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the case skeleton with default dictionaries.
    Create {
        /// Case root directory.
        case: PathBuf,
    },

    /// Print a dictionary.
    Show {
        case: PathBuf,
        /// Dictionary path relative to the case (e.g. system/controlDict).
        file: String,
        /// Output format: text or json.
        #[arg(long = "output", short = 'o', default_value = "text")]
        output: String,
    },

    /// Print one entry, addressed as a scoped key (e.g. solvers/p/tolerance).
    Get {
        case: PathBuf,
        file: String,
        key: String,
    },

    /// Assign a scalar entry and write the dictionary back.
    Set {
        case: PathBuf,
        file: String,
        key: String,
        value: String,
    },

    /// Remove an entry and write the dictionary back.
    Unset {
        case: PathBuf,
        file: String,
        key: String,
    },

    /// List time directories.
    Times {
        case: PathBuf,
    },

    /// Print the command line that runs the case's solver.
    Solver {
        case: PathBuf,
    },

    /// Show or update the OpenFOAM environment settings.
    Env {
        /// Run OpenFOAM through WSL.
        #[arg(long)]
        wsl: Option<bool>,
        /// WSL distribution (empty for the default one).
        #[arg(long)]
        distro: Option<String>,
        /// OpenFOAM bashrc to source.
        #[arg(long)]
        bashrc: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(ClientConfig::default_path);
    debug!("client config: {}", config_path.display());

    match cli.command {
        Commands::Create { case } => commands::case::create(&case),
        Commands::Show { case, file, output } => commands::dict::show(&case, &file, &output),
        Commands::Get { case, file, key } => commands::dict::get(&case, &file, &key),
        Commands::Set {
            case,
            file,
            key,
            value,
        } => commands::dict::set(&case, &file, &key, &value),
        Commands::Unset { case, file, key } => commands::dict::unset(&case, &file, &key),
        Commands::Times { case } => commands::case::times(&case),
        Commands::Solver { case } => {
            let config = ClientConfig::load(&config_path)?;
            commands::case::solver(&case, &config)
        }
        Commands::Env {
            wsl,
            distro,
            bashrc,
        } => commands::env::update(&config_path, wsl, distro, bashrc),
    }
}
