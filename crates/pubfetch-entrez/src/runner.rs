//! Ingest pipeline: affiliation search, batched fetch, extract, upsert

use std::time::Instant;

use anyhow::{Context, Result};
use pubfetch_store::Store;

use crate::client::Client;
use crate::transform::extract_article;

/// Ingest run summary
#[derive(Debug)]
pub struct Summary {
    /// PMIDs matched by the affiliation search
    pub matched: usize,
    /// Records returned by the batched metadata fetch
    pub fetched: usize,
    /// Articles upserted into the store
    pub inserted: usize,
    pub elapsed: std::time::Duration,
}

/// Run the ingest pipeline for one affiliation.
///
/// The whole PMID list goes into a single batched fetch; each upsert is an
/// independent unit, so a storage failure aborts the remaining batch but
/// leaves already-written rows in place.
pub fn run(client: &Client, store: &mut Store, affiliation: &str, retmax: usize) -> Result<Summary> {
    let start = Instant::now();

    let pmids = client.search_affiliation(affiliation, retmax)?;
    let records = client.fetch_metadata(&pmids)?;
    if records.len() < pmids.len() {
        // Withdrawn or invalid PMIDs simply have no record in the response
        log::debug!(
            "{} of {} PMIDs returned no metadata record",
            pmids.len() - records.len(),
            pmids.len()
        );
    }

    let mut inserted = 0;
    for record in &records {
        let article = extract_article(record);
        store
            .upsert(&article)
            .with_context(|| format!("Failed to store article {}", article.pmid))?;
        log::info!("Inserted article {}", article.pmid);
        inserted += 1;
    }

    let summary = Summary {
        matched: pmids.len(),
        fetched: records.len(),
        inserted,
        elapsed: start.elapsed(),
    };

    log::info!("=== Ingest Summary ===");
    log::info!(
        "PMIDs: {} matched, {} fetched, {} inserted",
        summary.matched,
        summary.fetched,
        summary.inserted
    );
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    Ok(summary)
}
