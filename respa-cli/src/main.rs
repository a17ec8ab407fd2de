//! respa-cli: import bookable spaces into Respa and browse units

mod cli;
mod config;
mod importer;
mod models;
mod repository;
mod web;

use anyhow::Result;
use clap::Parser;

use cli::commands::{import, serve, units};
use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    if let Some(database) = cli.database {
        config.database_url = Some(database);
    }

    match cli.command {
        Commands::Import(args) => import::handle_import_command(args, &config).await,
        Commands::Importers => import::handle_importers_command(),
        Commands::Serve(args) => serve::handle_serve_command(args, &config).await,
        Commands::Units(command) => units::handle_units_command(command, &config).await,
        Commands::Migrate => {
            let url = config.resolve_database_url()?;
            repository::connect(&url).await?;
            log::info!("Database schema is up to date: {}", url);
            Ok(())
        }
    }
}
