use serde::{Deserialize, Serialize};

use crate::records::{BookId, PatronId};

/// State changes applied to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CatalogEvent {
    /// A book was attached to the book index
    BookAdded {
        /// Id of the new book
        book_id: BookId,
    },
    /// An existing book had its title, author and ISBN rewritten
    BookUpdated {
        /// Id of the rewritten book
        book_id: BookId,
    },
    /// A patron was attached to the patron index
    PatronAdded {
        /// Id of the new patron
        patron_id: PatronId,
    },
    /// A borrow by an unknown patron id created a placeholder patron
    PatronAutoCreated {
        /// Id of the placeholder patron
        patron_id: PatronId,
    },
    /// A book went on loan
    Borrowed {
        /// Book taken off the shelf
        book_id: BookId,
        /// Patron now holding it
        patron_id: PatronId,
        /// Borrow count of the book after this loan
        borrow_count: u64,
    },
    /// A book came back
    Returned {
        /// Book put back on the shelf
        book_id: BookId,
        /// Patron who held it
        patron_id: PatronId,
    },
}
