//! aws-upload CLI - Upload a local folder to a remote host with rsync.
//!
//! Usage:
//!   aws-upload upload <proj> <env> [--simulate]
//!   aws-upload keys | projs | envs <proj>
//!   aws-upload new <key> | edit <key> | check <key>
//!   aws-upload copy <src> <dest>

mod cli;

use anyhow::Result;
use aws_upload::{config, SettingsStore};
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    // RUST_LOG wins over the flags
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("aws_upload={}", log_level))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let store = SettingsStore::new(config::settings_dir(cli.home));
    tracing::debug!("Settings directory: {:?}", store.dir());

    match cli.command {
        Commands::Upload {
            proj,
            env,
            simulate,
        } => cli::commands::upload(&store, &proj, env.as_deref(), simulate, cli.quiet),
        Commands::Keys => cli::commands::keys(&store),
        Commands::Projs => cli::commands::projs(&store),
        Commands::Envs { proj } => cli::commands::envs(&store, &proj),
        Commands::New { key } => cli::commands::new_setting(&store, &key),
        Commands::Edit { key } => cli::commands::edit(&store, &key),
        Commands::Copy { src, dest } => cli::commands::copy(&store, &src, &dest),
        Commands::Check { key } => cli::commands::check(&store, &key),
    }
}
