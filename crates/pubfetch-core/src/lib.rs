//! Pubfetch Core - Common infrastructure for the pubfetch workspace
//!
//! This crate provides the pieces shared by the Entrez client, the record
//! store, and the front-end binaries: the `Article` domain type, a blocking
//! HTTP facade over a shared async client, and logging setup.

pub mod article;
pub mod http;
pub mod logging;

// Re-exports for convenience
pub use article::Article;
pub use http::{FetchError, SHARED_RUNTIME, get_text, http_client};
pub use logging::init_logging;
