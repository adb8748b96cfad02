use serde::Serialize;
use thiserror::Error;

use crate::records::{BookId, PatronId};

/// Cause of a rejected catalog operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The book or patron id is not in its index
    NotFound,
    /// Borrow attempted on a book already on loan
    AlreadyUnavailable,
    /// Return attempted on a book that is on the shelf
    AlreadyAvailable,
    /// Return attempted by a patron who does not hold the book
    OwnershipMismatch,
}

/// Rejected catalog operation.
///
/// Each variant renders the same text whatever its [`ErrorKind`], so an
/// unknown book and a book on loan both read "not available for borrowing".
/// Callers that need the cause should match on [`CatalogError::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum CatalogError {
    /// Borrow of a book that is unknown or on loan
    #[error("Book ID {book_id} is not available for borrowing.")]
    NotAvailable {
        /// Requested book
        book_id: BookId,
        /// `NotFound` or `AlreadyUnavailable`
        kind: ErrorKind,
    },
    /// Return of a book that is unknown or on the shelf
    #[error("Book ID {book_id} is not currently borrowed.")]
    NotBorrowed {
        /// Returned book
        book_id: BookId,
        /// `NotFound` or `AlreadyAvailable`
        kind: ErrorKind,
    },
    /// Return by a patron who is unknown or does not hold the book
    #[error("Patron {patron_id} did not borrow Book ID {book_id}.")]
    NotBorrowedBy {
        /// Returned book
        book_id: BookId,
        /// Patron attempting the return
        patron_id: PatronId,
        /// `NotFound` or `OwnershipMismatch`
        kind: ErrorKind,
    },
}

impl CatalogError {
    /// Cause of the rejection
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAvailable { kind, .. }
            | Self::NotBorrowed { kind, .. }
            | Self::NotBorrowedBy { kind, .. } => *kind,
        }
    }
}
