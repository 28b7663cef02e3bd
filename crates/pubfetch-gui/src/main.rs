//! pubfetch-gui - minimal window over the ingest pipeline
//!
//! A text field, a search button, and a result list. The ingest itself
//! runs on a background thread so the view stays responsive.

use std::path::PathBuf;

use clap::Parser;

mod app;

use app::App;

#[derive(Parser)]
#[command(name = "pubfetch-gui")]
#[command(about = "GUI front-end for the PubMed affiliation harvester")]
#[command(version)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, default_value = "publications.db")]
    database: PathBuf,

    /// NCBI API key
    #[arg(long)]
    api_key: Option<String>,

    /// Contact email for NCBI
    #[arg(long)]
    email: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> eframe::Result {
    let cli = Cli::parse();

    pubfetch_core::init_logging(cli.debug);

    let entrez_config = pubfetch_entrez::Config {
        api_key: cli.api_key,
        email: cli.email,
        ..pubfetch_entrez::Config::default()
    };
    let app = App::new(cli.database, entrez_config);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([520.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native("pubfetch", options, Box::new(move |_cc| Ok(Box::new(app))))
}
