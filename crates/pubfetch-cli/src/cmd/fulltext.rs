//! `pubfetch fulltext` - fetch full-text XML from PubMed Central

use anyhow::Result;
use clap::Args;
use pubfetch_entrez::{Client, FulltextError};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct FulltextArgs {
    /// PMCID to fetch, e.g. PMC7168437
    pub pmcid: String,

    /// NCBI API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Contact email for NCBI
    #[arg(long)]
    pub email: Option<String>,
}

pub fn run(args: FulltextArgs, config: &Config) -> Result<()> {
    let entrez_config = pubfetch_entrez::Config {
        base_url: config.entrez.base_url.clone(),
        api_key: args.api_key.or_else(|| config.entrez.api_key.clone()),
        email: args.email.or_else(|| config.entrez.email.clone()),
        ..pubfetch_entrez::Config::default()
    };
    let client = Client::new(entrez_config);

    // Full-text failures degrade to absence, never to a process failure
    match client.fetch_fulltext(&args.pmcid) {
        Ok(text) => println!("{text}"),
        Err(FulltextError::NotAvailable) => {
            log::warn!("No full text available for {}", args.pmcid);
            eprintln!("No full text available for {}", args.pmcid);
        }
        Err(FulltextError::Transient(e)) => {
            log::error!("Failed to fetch full text for {}: {}", args.pmcid, e);
            eprintln!("No full text available for {}", args.pmcid);
        }
    }
    Ok(())
}
