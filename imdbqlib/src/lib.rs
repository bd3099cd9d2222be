//! # imdbqlib
//!
//! Fixed, parameterized lookups against a movie database, with results
//! rendered as aligned plain-text tables.
//!
//! ## Overview
//!
//! The library runs one of four lookups against a Postgres database holding
//! an IMDb-style schema (`titles`, `titles_genres`, `persons`, `cast_info`,
//! `title_person_character`) and turns the rows into a numbered, column
//! aligned table followed by a `Total results: N` line.
//!
//! The pipeline has three stages:
//!
//! - **Query**: Pick a lookup and bind its one typed parameter (`query`)
//! - **Fetch**: Execute it over a single connection, reading at most
//!   `limit + 1` rows (`db`)
//! - **Output**: Measure and lay out the rows, report the total (`output`)
//!
//! `run_query` chains all three.
//!
//! ## Features
//!
//! - **Bound parameters only**: User input never becomes SQL text
//! - **Bounded fetch**: A single look-ahead row tells whether results were
//!   truncated; an optional `COUNT(*)` gives the exact total
//! - **Typed errors**: Driver, connection and query failures are distinct
//! - **Pure formatting**: The table renderer takes any row iterator and
//!   returns a string, no I/O
//!
//! ## Example
//!
//! ```rust
//! use imdbqlib::output::ResultTable;
//!
//! let rows = vec![
//!     vec![Some("Alice".to_string()), Some("30".to_string())],
//!     vec![Some("Bob".to_string()), None],
//! ];
//! let table = ResultTable::collect(rows, &["name", "age"], 10);
//!
//! assert_eq!(table.widths, vec![1, 5, 4]);
//! assert_eq!(table.to_text(), " #  name   age  \n 1  Alice  30   \n 2  Bob    null \n");
//! ```
//!
//! Running a lookup needs a reachable database:
//!
//! ```rust,no_run
//! use imdbqlib::{run_query, ConnectionConfig, QueryKind, RunOptions};
//!
//! let config = ConnectionConfig::from_env();
//! let query = QueryKind::TitlesByGenre.bind("Comedy")?;
//! let report = run_query(&config, &query, &RunOptions::new())?;
//! print!("{}", report.table.to_text());
//! println!("{}", report.summary_line());
//! # Ok::<(), imdbqlib::ImdbqError>(())
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod lookup;
pub mod output;
pub mod query;

pub use config::ConnectionConfig;
pub use db::{Database, QueryRows};
pub use error::{ErrorKind, ImdbqError};
pub use lookup::{run_query, RunOptions, DEFAULT_LIMIT};
pub use output::{render, QueryReport, ResultTable, Total};
pub use query::{Param, PreparedQuery, QueryKind};

/// Result type for imdbqlib operations
pub type Result<T> = std::result::Result<T, ImdbqError>;
