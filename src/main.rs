use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use coinquery::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for coinquery::AppCommand {
    fn from(cmd: Commands) -> coinquery::AppCommand {
        match cmd {
            Commands::Price { symbols, service } => coinquery::AppCommand::Price { symbols, service },
            Commands::Attr {
                symbol,
                attr,
                service,
            } => coinquery::AppCommand::Attr {
                symbol,
                attr,
                service,
            },
            Commands::FloatAttr {
                symbol,
                attr,
                service,
            } => coinquery::AppCommand::FloatAttr {
                symbol,
                attr,
                service,
            },
            Commands::Providers => coinquery::AppCommand::Providers,
            Commands::Watch {
                symbols,
                service,
                interval,
                rounds,
            } => coinquery::AppCommand::Watch {
                symbols,
                service,
                interval_secs: interval,
                rounds,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the price of one or more symbols
    Price {
        #[arg(required = true)]
        symbols: Vec<String>,
        /// Provider to query, defaults to the configured default service
        #[arg(short, long)]
        service: Option<String>,
    },
    /// Show a raw attribute of a symbol
    Attr {
        symbol: String,
        attr: String,
        #[arg(short, long)]
        service: Option<String>,
    },
    /// Show an attribute of a symbol as a number
    FloatAttr {
        symbol: String,
        attr: String,
        #[arg(short, long)]
        service: Option<String>,
    },
    /// List known providers
    Providers,
    /// Print prices periodically, refreshing providers between rounds
    Watch {
        #[arg(required = true)]
        symbols: Vec<String>,
        #[arg(short, long)]
        service: Option<String>,
        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 60)]
        interval: u64,
        /// Stop after this many rounds
        #[arg(short, long)]
        rounds: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => coinquery::cli::setup::setup(),
        Some(cmd) => coinquery::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
