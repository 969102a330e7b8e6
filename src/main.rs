//! fwdlist - Mikrotik RouterOS scripts from the GFWList domain list
//!
//! Fetches the list, extracts its domains and writes either DNS forward
//! entries or a resolved firewall address-list.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use fwdlist::cli::{Cli, Commands};
use fwdlist::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let command = cli.command.unwrap_or(Commands::AddressList {
        output: None,
        resolver: None,
        dry_run: false,
    });

    // Commands that need no configuration
    match command {
        Commands::Config => {
            print!("{}", Config::generate_default_yaml());
            return Ok(());
        }
        Commands::Version => {
            println!("fwdlist {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load_or_default(cli.config.as_deref())?;

    match command {
        Commands::Forward { output, dry_run } => {
            fwdlist::commands::forward::run(&config, output.as_deref(), dry_run).await
        }
        Commands::AddressList {
            output,
            resolver,
            dry_run,
        } => {
            fwdlist::commands::address_list::run(&config, output.as_deref(), resolver, dry_run)
                .await
        }
        Commands::Domains => fwdlist::commands::domains::run(&config).await,
        Commands::Config | Commands::Version => Ok(()),
    }
}
