//! Command-line interface definitions

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "respa-cli", version, about = "Import bookable spaces into Respa and browse units")]
pub struct Cli {
    /// Config file (default: <config dir>/respa-cli/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database URL, e.g. sqlite://respa.db
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a resource importer
    Import(ImportArgs),
    /// List registered importers
    Importers,
    /// Serve the admin pages
    Serve(ServeArgs),
    /// Inspect and add units
    #[command(subcommand)]
    Units(UnitsCommands),
    /// Create or upgrade the database schema
    Migrate,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Importer name
    #[arg(default_value = "kirjasto10")]
    pub importer: String,

    /// Fetch the sheet from this URL instead of the importer's default
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Read the sheet from a local CSV file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (default: 127.0.0.1:8000)
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum UnitsCommands {
    /// Print one page of units
    List {
        /// Page number or "last"
        #[arg(long, default_value = "1")]
        page: String,
    },
    /// Add or replace a unit
    Add {
        /// Unit id, e.g. tprek:8310
        id: String,
        /// Finnish name
        name: String,
        #[arg(long)]
        name_en: Option<String>,
        /// Finnish street address
        #[arg(long)]
        address: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_import_defaults_to_library_importer() {
        let cli = Cli::try_parse_from(["respa-cli", "import"]).unwrap();
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.importer, "kirjasto10");
                assert!(args.url.is_none() && args.file.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_import_url_conflicts_with_file() {
        let result = Cli::try_parse_from([
            "respa-cli",
            "import",
            "--url",
            "https://example.org/a.csv",
            "--file",
            "a.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_units_list_page() {
        let cli = Cli::try_parse_from(["respa-cli", "units", "list", "--page", "last"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Units(UnitsCommands::List { page }) if page == "last"
        ));
    }
}
