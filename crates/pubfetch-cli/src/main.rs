//! pubfetch - PubMed affiliation harvester
//!
//! Searches PubMed by author affiliation, stores normalized article
//! records in a local SQLite database with full-text search, and queries
//! them back.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "pubfetch")]
#[command(about = "PubMed affiliation harvester with local full-text search")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./pubfetch.toml or ~/.config/pubfetch/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Search PubMed by affiliation and store the results
    Search(cmd::search::SearchArgs),
    /// Query stored publications by full-text match
    Query(cmd::query::QueryArgs),
    /// Fetch full-text XML from PubMed Central for a PMCID
    Fulltext(cmd::fulltext::FulltextArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    pubfetch_core::init_logging(cli.debug);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Search(args) => cmd::search::run(args, &config),
        Command::Query(args) => cmd::query::run(args, &config),
        Command::Fulltext(args) => cmd::fulltext::run(args, &config),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec![
                "Database",
                &config.database.path.display().to_string(),
            ]);
            table.add_row(vec!["Entrez base URL", &config.entrez.base_url]);
            table.add_row(vec![
                "API key",
                if config.entrez.api_key.is_some() {
                    "configured"
                } else {
                    "not set"
                },
            ]);
            table.add_row(vec![
                "Contact email",
                config.entrez.email.as_deref().unwrap_or("not set"),
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
