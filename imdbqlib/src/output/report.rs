//! The rendered result of one lookup plus its total-results line.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::QueryRows;
use crate::query::PreparedQuery;

use super::table::ResultTable;

/// How many rows a query matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Total {
    /// The full count is known
    Exact(u64),
    /// Rows beyond the look-ahead were not counted
    AtLeast(u64),
}

impl Total {
    /// The known lower bound (or exact value).
    pub fn value(&self) -> u64 {
        match self {
            Total::Exact(n) | Total::AtLeast(n) => *n,
        }
    }
}

impl fmt::Display for Total {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Total::Exact(n) => write!(f, "{}", n),
            Total::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// A lookup's table and its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReport {
    /// The lookup that produced this report
    pub query: PreparedQuery,
    /// Displayed rows
    pub table: ResultTable,
    /// Number of matching rows
    pub total: Total,
}

impl QueryReport {
    /// Build a report from fetched rows, displaying at most `limit`.
    ///
    /// The total is exact when every fetched row fits under the limit;
    /// otherwise it is a lower bound until `with_exact_total` fills it in.
    pub fn new(query: PreparedQuery, fetched: QueryRows, limit: usize) -> Self {
        let table = ResultTable::collect(fetched.rows, fetched.columns.as_slice(), limit);
        let seen = table.total_count as u64;
        let total = if table.has_more {
            Total::AtLeast(seen)
        } else {
            Total::Exact(seen)
        };

        QueryReport {
            query,
            table,
            total,
        }
    }

    /// Replace the total with a full count.
    pub fn with_exact_total(mut self, count: u64) -> Self {
        self.total = Total::Exact(count);
        self
    }

    /// Whether more rows matched than the table shows.
    pub fn is_truncated(&self) -> bool {
        self.table.has_more
    }

    /// The trailing summary, e.g. `Total results: 42`.
    pub fn summary_line(&self) -> String {
        format!("Total results: {}", self.total)
    }
}
