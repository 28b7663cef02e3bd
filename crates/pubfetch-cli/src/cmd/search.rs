//! `pubfetch search` - run the ingest pipeline for an affiliation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pubfetch_entrez::Client;
use pubfetch_store::Store;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Affiliation to search for
    pub affiliation: String,

    /// NCBI API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Contact email for NCBI
    #[arg(long)]
    pub email: Option<String>,

    /// Path to the SQLite database
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Maximum number of PMIDs to fetch
    #[arg(long, default_value_t = 1000)]
    pub max_results: usize,
}

pub fn run(args: SearchArgs, config: &Config) -> Result<()> {
    let entrez_config = pubfetch_entrez::Config {
        base_url: config.entrez.base_url.clone(),
        api_key: args.api_key.or_else(|| config.entrez.api_key.clone()),
        email: args.email.or_else(|| config.entrez.email.clone()),
        ..pubfetch_entrez::Config::default()
    };
    let client = Client::new(entrez_config);

    let db_path = args
        .database
        .unwrap_or_else(|| config.database.path.clone());
    let mut store = Store::open(&db_path)?;

    pubfetch_entrez::run(&client, &mut store, &args.affiliation, args.max_results)?;
    Ok(())
}
