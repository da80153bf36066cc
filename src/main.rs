//! Folio - a portfolio site generator with a local admin editor.

mod admin;
mod build;
mod cli;
mod config;
mod data;
mod edit;
mod init;
mod logger;
mod render;
mod serve;
mod utils;

use anyhow::{Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_site;
use serve::serve_site;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config),
        Commands::Serve { .. } => serve_site(&config),
        Commands::Export => {
            println!("{}", edit::export(&config.store())?);
            Ok(())
        }
        Commands::Import { file } => edit::import(&config.store(), file),
        Commands::Slide(cmd) => edit::slide(config.store(), cmd),
        Commands::Photo(cmd) => edit::photo(config.store(), cmd),
        Commands::Experience(cmd) => edit::experience(config.store(), cmd),
        Commands::Project(cmd) => edit::project(config.store(), cmd),
        Commands::Client(cmd) => edit::client(config.store(), cmd),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
