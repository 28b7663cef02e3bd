//! The persisted publication record

/// A normalized PubMed article, one row per PMID.
///
/// Produced by field extraction in `pubfetch-entrez` and persisted by
/// `pubfetch-store`. Re-ingesting a PMID fully replaces the previous row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    /// PubMed identifier, primary key
    pub pmid: String,
    /// Article title, empty when the source record has none
    pub title: String,
    /// Abstract text, segments joined with single spaces; empty when absent
    pub abstract_text: String,
    /// PubMed Central cross-reference, used for full-text retrieval
    pub pmcid: Option<String>,
    /// Journal title
    pub journal: Option<String>,
    /// Publication year; None when the source date has no parseable year
    pub year: Option<i32>,
}
