//! SQLite store implementation

use std::path::Path;

use anyhow::{Context, Result};
use pubfetch_core::Article;
use rusqlite::{Connection, params};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    pmid TEXT PRIMARY KEY,
    title TEXT,
    abstract TEXT,
    pmcid TEXT,
    journal TEXT,
    year INTEGER
);

CREATE VIRTUAL TABLE IF NOT EXISTS article_fts USING fts5(
    pmid,
    title,
    abstract
);
"#;

/// One full-text search result, most relevant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub pmid: String,
    pub title: String,
}

/// Article store over a single SQLite connection.
///
/// One connection per process invocation; no cross-call state beyond the
/// persisted rows.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the database file and ensure the schema exists.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("failed to open database {}", db_path.display()))?;
        conn.execute_batch(SCHEMA)
            .context("failed to initialize database schema")?;
        Ok(Self { conn })
    }

    /// Insert or fully replace the row for `article.pmid`.
    ///
    /// The primary row and the FTS projection are written in one
    /// transaction. FTS5 has no unique-key semantics, so the projection
    /// row is deleted and re-inserted rather than INSERT OR REPLACE'd.
    pub fn upsert(&mut self, article: &Article) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO articles (pmid, title, abstract, pmcid, journal, year)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                article.pmid,
                article.title,
                article.abstract_text,
                article.pmcid,
                article.journal,
                article.year,
            ],
        )?;
        tx.execute(
            "DELETE FROM article_fts WHERE pmid = ?1",
            params![article.pmid],
        )?;
        tx.execute(
            "INSERT INTO article_fts (pmid, title, abstract) VALUES (?1, ?2, ?3)",
            params![article.pmid, article.title, article.abstract_text],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Full-text search over title/abstract, BM25-ranked.
    ///
    /// `query` uses FTS5 MATCH syntax. No matches yields an empty vec.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let mut stmt = self.conn.prepare(
            "SELECT pmid, title FROM article_fts WHERE article_fts MATCH ?1 ORDER BY rank",
        )?;
        let hits = stmt
            .query_map(params![query], |row| {
                Ok(SearchHit {
                    pmid: row.get(0)?,
                    title: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(hits)
    }
}
