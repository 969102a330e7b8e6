//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ResolverKind;

#[derive(Parser)]
#[command(name = "fwdlist")]
#[command(
    author,
    version,
    about = "Generate Mikrotik RouterOS scripts from the GFWList domain list"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Defaults to `address-list`
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Quiet mode (for cron/CI)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output, including per-domain resolution failures)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate `/ip dns static` FWD entries for every listed domain
    Forward {
        /// Output file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the script to stdout instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Resolve every listed domain and generate a firewall address-list
    AddressList {
        /// Output file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Resolution strategy (overrides config)
        #[arg(long, value_enum)]
        resolver: Option<ResolverKind>,

        /// Print the script to stdout instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the extracted domain list, one per line
    Domains,

    /// Print the default configuration file
    Config,

    /// Show version
    Version,
}
