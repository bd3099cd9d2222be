//! High-level lookup API.
//!
//! `run_query` is the one-call path used by the CLI: connect, fetch a
//! bounded number of rows, render them, optionally count the rest, and
//! release the connection.

use log::debug;

use crate::config::ConnectionConfig;
use crate::db::Database;
use crate::output::QueryReport;
use crate::query::PreparedQuery;
use crate::Result;

/// Rows displayed when no limit is given.
pub const DEFAULT_LIMIT: usize = 100;

/// Options for running a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum number of rows to display
    pub limit: usize,
    /// Run a `COUNT(*)` when more rows matched than are displayed
    pub exact_total: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            exact_total: true,
        }
    }
}

impl RunOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set whether truncated results get an exact count.
    pub fn exact_total(mut self, exact: bool) -> Self {
        self.exact_total = exact;
        self
    }
}

/// Connect with `config`, run `query` and build its report.
///
/// The connection is released before returning, on success and on error.
pub fn run_query(
    config: &ConnectionConfig,
    query: &PreparedQuery,
    options: &RunOptions,
) -> Result<QueryReport> {
    let mut db = Database::connect(config)?;
    let fetched = db.fetch(query, options.limit)?;
    let mut report = QueryReport::new(query.clone(), fetched, options.limit);

    if report.is_truncated() && options.exact_total {
        let count = db.count(query)?;
        report = report.with_exact_total(count);
    }

    debug!("{} on {} -> {}", query.kind.label(), db.target(), report.total);
    db.close()?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_default_options() {
        let options = RunOptions::new();
        assert_eq!(options.limit, 100);
        assert!(options.exact_total);
    }

    #[test]
    fn test_builder() {
        let options = RunOptions::new().limit(5).exact_total(false);
        assert_eq!(options.limit, 5);
        assert!(!options.exact_total);
    }

    #[test]
    fn test_run_query_surfaces_config_errors() {
        let config = ConnectionConfig::new("imdb").user("");
        let err = run_query(
            &config,
            &PreparedQuery::titles_by_year(2022),
            &RunOptions::new(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
