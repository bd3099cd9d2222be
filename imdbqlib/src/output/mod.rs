//! Output formatting: present fetched rows as aligned text.
//!
//! This module handles the final stage of the pipeline - turning fetched
//! rows into what the user sees. It provides:
//!
//! - **ResultTable**: Numbered, measured rows with per-column widths
//! - **render**: One-call formatting of a row source into text
//! - **QueryReport**: A table plus its `Total results` line
//!
//! Everything here builds strings; printing belongs to the caller.
//!
//! ## Example
//!
//! ```rust
//! use imdbqlib::output::render;
//!
//! let rows = vec![
//!     vec![Some("Alice".to_string()), Some("30".to_string())],
//!     vec![Some("Bob".to_string()), None],
//! ];
//! let (text, total) = render(rows, &["name", "age"], 10);
//! assert_eq!(total, 2);
//! assert_eq!(text.lines().nth(2), Some(" 2  Bob    null "));
//! ```

pub mod report;
pub mod table;

pub use report::{QueryReport, Total};
pub use table::{render, ResultTable, INDEX_HEADER, NULL_TEXT};
