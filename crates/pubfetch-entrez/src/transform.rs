//! Field extraction from parsed PubMed records
//!
//! Pure functions, no I/O. Missing fields are substituted with defaults
//! rather than raised.

use pubfetch_core::Article;

use crate::parser::PubmedRecord;

/// Extract a normalized [`Article`] from a parsed record.
///
/// - title defaults to the empty string
/// - abstract segments are joined with single spaces
/// - the year must parse as an integer, otherwise it is dropped
/// - the PMCID is the first cross-reference tagged `pmc`
pub fn extract_article(record: &PubmedRecord) -> Article {
    Article {
        pmid: record.pmid.clone(),
        title: record.title.clone().unwrap_or_default(),
        abstract_text: record.abstract_segments.join(" "),
        pmcid: record
            .article_ids
            .iter()
            .find(|id| id.id_type == "pmc")
            .map(|id| id.value.clone()),
        journal: record.journal_title.clone(),
        year: record.pub_year.as_deref().and_then(|y| y.parse().ok()),
    }
}
