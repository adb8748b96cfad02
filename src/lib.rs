//! Library catalog keeping books and patrons in two binary search trees.
//!
//! This crate provides the indexes, the borrow/return operations spanning
//! them, and the command-log processing that drives them from a text file.

pub mod book_index;
pub mod catalog;
pub mod command;
pub mod error;
pub mod events;
pub mod observers;
pub mod patron_index;
pub mod processor;
pub mod records;
pub mod report;
pub mod tree;
pub mod visualization;

pub use book_index::BookIndex;
pub use catalog::{CatalogConfig, LibraryCatalog};
pub use command::{Command, ParseError};
pub use error::{CatalogError, ErrorKind};
pub use events::CatalogEvent;
pub use observers::{CatalogObserver, TracingObserver};
pub use patron_index::PatronIndex;
pub use processor::{OutputFormat, RunSummary, process_log};
pub use records::{Book, BookId, Patron, PatronId};
pub use report::Outcome;
pub use visualization::{TreeStats, TreeVisualization};
