//! Entrez client configuration
//!
//! Credentials are explicit constructor inputs rather than process-global
//! state; every request carries them as query parameters when set.

/// Runtime configuration for the Entrez client
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the E-utilities endpoints
    pub base_url: String,
    /// NCBI API key; raises the server-side rate limit when set
    pub api_key: Option<String>,
    /// Contact email, passed along per NCBI usage policy
    pub email: Option<String>,
    /// Tool name reported to NCBI
    pub tool: String,
    /// Default maximum number of PMIDs returned by a search
    pub retmax: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/".to_string(),
            api_key: None,
            email: None,
            tool: "pubfetch".to_string(),
            retmax: 1000,
        }
    }
}
