//! Pubfetch Store - SQLite persistence for article records
//!
//! Maintains the `articles` table together with an FTS5 projection over
//! (pmid, title, abstract) for relevance-ranked text search. Both are
//! written in the same transaction, so the projection never diverges from
//! the primary table.

mod store;

pub use store::{SearchHit, Store};
