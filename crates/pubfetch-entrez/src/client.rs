//! NCBI E-utilities client
//!
//! ESearch for affiliation queries, one batched EFetch for metadata, and
//! PMC EFetch for full text. All calls are blocking and sequential.

use std::time::Duration;

use anyhow::{Context, Result};
use pubfetch_core::{FetchError, get_text};

use crate::config::Config;
use crate::parser::{PubmedRecord, parse_pubmed_xml};

/// Delay after a successful full-text fetch. NCBI allows at most three
/// requests per second without an API key.
const FULLTEXT_DELAY: Duration = Duration::from_millis(340);

/// Failure modes of full-text retrieval.
///
/// Callers are expected to degrade `NotAvailable` to absence; `Transient`
/// leaves any retry decision to them.
#[derive(Debug)]
pub enum FulltextError {
    /// The remote has no full text deposited for this identifier
    NotAvailable,
    /// Network or server failure; a later attempt may succeed
    Transient(FetchError),
}

impl std::fmt::Display for FulltextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAvailable => write!(f, "no full text available"),
            Self::Transient(e) => write!(f, "transient fetch failure: {e}"),
        }
    }
}

impl std::error::Error for FulltextError {}

/// Blocking Entrez client.
pub struct Client {
    config: Config,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Query parameters sent with every request: tool name, plus contact
    /// email and API key when configured.
    fn common_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("tool", self.config.tool.clone())];
        if let Some(email) = &self.config.email {
            params.push(("email", email.clone()));
        }
        if let Some(key) = &self.config.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}{name}", self.config.base_url)
    }

    /// Search PubMed for PMIDs whose author affiliation matches
    /// `affiliation`, up to `retmax` results in remote order.
    pub fn search_affiliation(&self, affiliation: &str, retmax: usize) -> Result<Vec<String>> {
        log::info!("Searching PubMed for affiliation: {affiliation}");
        let mut params = self.common_params();
        params.push(("db", "pubmed".to_string()));
        params.push(("term", format!("{affiliation}[AD]")));
        params.push(("retmax", retmax.to_string()));
        params.push(("retmode", "json".to_string()));

        let body =
            get_text(&self.endpoint("esearch.fcgi"), &params).context("ESearch request failed")?;

        let parsed: serde_json::Value =
            serde_json::from_str(&body).context("Invalid ESearch JSON")?;
        let ids = parsed["esearchresult"]["idlist"]
            .as_array()
            .context("No idlist in ESearch response")?;
        let pmids: Vec<String> = ids
            .iter()
            .filter_map(|v| v.as_str())
            .map(String::from)
            .collect();
        log::debug!("Found {} PMIDs", pmids.len());
        Ok(pmids)
    }

    /// Fetch article metadata for `pmids` in a single batched EFetch call.
    ///
    /// An empty input returns an empty vec without contacting the remote
    /// service. PMIDs missing from the response are silently skipped.
    pub fn fetch_metadata(&self, pmids: &[String]) -> Result<Vec<PubmedRecord>> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }
        log::info!("Fetching metadata for {} PMIDs", pmids.len());
        let mut params = self.common_params();
        params.push(("db", "pubmed".to_string()));
        params.push(("id", pmids.join(",")));
        params.push(("rettype", "xml".to_string()));
        params.push(("retmode", "xml".to_string()));

        let body =
            get_text(&self.endpoint("efetch.fcgi"), &params).context("EFetch request failed")?;

        let records = parse_pubmed_xml(&body)?;
        log::debug!("Fetched {} records", records.len());
        Ok(records)
    }

    /// Fetch full-text XML from PubMed Central for a PMCID.
    ///
    /// Sleeps for the politeness delay after a successful fetch.
    pub fn fetch_fulltext(&self, pmcid: &str) -> Result<String, FulltextError> {
        log::info!("Fetching full text for PMCID: {pmcid}");
        let mut params = self.common_params();
        params.push(("db", "pmc".to_string()));
        params.push(("id", pmcid.to_string()));
        params.push(("rettype", "full".to_string()));

        match get_text(&self.endpoint("efetch.fcgi"), &params) {
            Ok(text) => {
                std::thread::sleep(FULLTEXT_DELAY);
                Ok(text)
            }
            Err(e) => match e.status() {
                // 4xx: nothing deposited for this id (or the id is bogus)
                Some(400..=499) => Err(FulltextError::NotAvailable),
                _ => Err(FulltextError::Transient(e)),
            },
        }
    }
}
