//! Query construction: the fixed lookups and their bound parameters.
//!
//! This module handles the first stage of the pipeline - turning a lookup
//! name and a raw input string into SQL text plus typed values. It provides:
//!
//! - **QueryKind**: The four fixed lookups and their SQL text
//! - **PreparedQuery**: A lookup with its parameter bound
//! - **Param**: A typed placeholder value
//!
//! ## Example
//!
//! ```rust
//! use imdbqlib::query::{Param, PreparedQuery, QueryKind};
//!
//! let query = QueryKind::TitlesByYear.bind("2022").unwrap();
//! assert_eq!(query.params, vec![Param::Int(2022)]);
//!
//! let query = PreparedQuery::characters_by_title("Star Wars");
//! assert_eq!(query.params, vec![Param::Text("%Star Wars%".into())]);
//! ```

pub mod param;
pub mod template;

pub use param::Param;
pub use template::{PreparedQuery, QueryKind};
