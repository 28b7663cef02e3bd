//! Pubfetch Entrez - NCBI E-utilities client and ingest pipeline
//!
//! Searches PubMed by author affiliation, fetches article metadata in one
//! batched EFetch call, extracts normalized fields, and upserts them into
//! the record store.
//!
//! # Example
//!
//! ```ignore
//! use pubfetch_entrez::{Client, Config, run};
//! use pubfetch_store::Store;
//!
//! let client = Client::new(Config::default());
//! let mut store = Store::open("publications.db".as_ref())?;
//! let summary = run(&client, &mut store, "University of Examples", 100)?;
//! println!("Inserted {} articles", summary.inserted);
//! ```

pub mod client;
pub mod config;
pub mod parser;
pub mod runner;
pub mod transform;

// Re-exports
pub use client::{Client, FulltextError};
pub use config::Config;
pub use parser::{ArticleId, PubmedRecord, parse_pubmed_xml};
pub use runner::{Summary, run};
pub use transform::extract_article;
