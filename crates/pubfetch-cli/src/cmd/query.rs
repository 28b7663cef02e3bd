//! `pubfetch query` - full-text search over stored publications

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pubfetch_store::Store;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// FTS query string
    pub query: String,

    /// Path to the SQLite database
    #[arg(long)]
    pub database: Option<PathBuf>,
}

pub fn run(args: QueryArgs, config: &Config) -> Result<()> {
    let db_path = args
        .database
        .unwrap_or_else(|| config.database.path.clone());
    let store = Store::open(&db_path)?;

    for hit in store.search(&args.query)? {
        println!("{} - {}", hit.pmid, hit.title);
    }
    Ok(())
}
