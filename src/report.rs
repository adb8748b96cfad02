//! Structured results of catalog operations and their text rendering.
//!
//! The catalog hands back [`Outcome`] values; the `Display` impls below
//! produce the line-oriented report written to the output log.

use std::fmt;

use serde::Serialize;

use crate::records::{Book, BookId, PatronId};

/// One book in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// Book id
    pub book_id: BookId,
    /// Book title
    pub title: String,
    /// Book author, as stored
    pub author: String,
}

impl From<&Book> for Listing {
    fn from(book: &Book) -> Self {
        Self { book_id: book.id, title: book.title.clone(), author: book.author.clone() }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- Book ID {}: \"{}\" by {}", self.book_id, self.title, self.author)
    }
}

/// One book on loan to a patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loan {
    /// Book id
    pub book_id: BookId,
    /// Book title
    pub title: String,
}

/// Full description of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetails {
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// Book ISBN
    pub isbn: String,
    /// Whether the book is on the shelf
    pub available: bool,
    /// Number of times the book has been borrowed
    pub borrow_count: u64,
}

impl From<&Book> for BookDetails {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            available: book.available,
            borrow_count: book.borrow_count,
        }
    }
}

/// Successful result of a catalog operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A book was added, or its description rewritten
    BookAdded {
        /// Book id
        book_id: BookId,
        /// Title as given
        title: String,
        /// Author as given
        author: String,
        /// ISBN as given
        isbn: String,
        /// True when the id already existed
        updated: bool,
    },
    /// A patron was added, or already existed
    PatronAdded {
        /// Patron id
        patron_id: PatronId,
        /// Name stored in the index, which is the old one if the id existed
        name: String,
        /// False when the id already existed
        created: bool,
    },
    /// A book went on loan
    Borrowed {
        /// Borrowing patron
        patron_id: PatronId,
        /// Borrowed book
        book_id: BookId,
        /// Title of the borrowed book
        title: String,
    },
    /// A book came back
    Returned {
        /// Returning patron
        patron_id: PatronId,
        /// Returned book
        book_id: BookId,
        /// Title of the returned book
        title: String,
    },
    /// Lookup of a single book, `details` is `None` for an unknown id
    BookDetails {
        /// Requested id
        book_id: BookId,
        /// Description of the book, if it exists
        details: Option<BookDetails>,
    },
    /// Every shelved book
    AvailableBooks {
        /// Books in ascending id order
        books: Vec<Listing>,
    },
    /// Every book by one author
    BooksByAuthor {
        /// Author name as queried
        author: String,
        /// Books in ascending id order
        books: Vec<Listing>,
    },
    /// Books held by one patron
    PatronBooks {
        /// Requested patron
        patron_id: PatronId,
        /// Loans in borrow order, empty for an unknown patron
        loans: Vec<Loan>,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BookAdded { book_id, title, author, isbn, .. } => {
                write!(f, "Added Book: {book_id} - \"{title}\" by {author}, ISBN: {isbn}")
            }
            Self::PatronAdded { patron_id, name, .. } => {
                write!(f, "Added Patron: {patron_id} - {name}")
            }
            Self::Borrowed { patron_id, book_id, title } => {
                write!(f, "Patron {patron_id} borrowed \"{title}\" (Book ID: {book_id})")
            }
            Self::Returned { patron_id, book_id, title } => {
                write!(f, "Patron {patron_id} returned \"{title}\" (Book ID: {book_id})")
            }
            Self::BookDetails { book_id, details: None } => {
                write!(f, "Book Details for ID {book_id}:")
            }
            Self::BookDetails { book_id, details: Some(details) } => {
                let available = if details.available { "Yes" } else { "No" };
                write!(
                    f,
                    "Book Details for ID {book_id}:\n- \"{}\" by {}, ISBN: {}, Available: {available}",
                    details.title, details.author, details.isbn
                )
            }
            Self::AvailableBooks { books } => {
                write!(f, "Available Books:")?;
                write_lines(f, books)
            }
            Self::BooksByAuthor { author, books } if books.is_empty() => {
                write!(f, "No books found by Author \"{author}\".")
            }
            Self::BooksByAuthor { author, books } => {
                write!(f, "Books by Author \"{author}\":")?;
                write_lines(f, books)
            }
            Self::PatronBooks { patron_id, loans } if loans.is_empty() => {
                write!(f, "Patron {patron_id} has not borrowed any books.")
            }
            Self::PatronBooks { patron_id, loans } => {
                write!(f, "Patron {patron_id} borrowed the following books:")?;
                for loan in loans {
                    write!(f, "\n- \"{}\" (Book ID: {})", loan.title, loan.book_id)?;
                }
                Ok(())
            }
        }
    }
}

/// Write each listing on its own line after the header
fn write_lines(f: &mut fmt::Formatter<'_>, books: &[Listing]) -> fmt::Result {
    for book in books {
        write!(f, "\n{book}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Listing fixture
    fn listing(book_id: BookId, title: &str, author: &str) -> Listing {
        Listing { book_id, title: title.to_string(), author: author.to_string() }
    }

    #[test]
    fn test_book_details_rendering() {
        let missing = Outcome::BookDetails { book_id: 9, details: None };
        assert_eq!(missing.to_string(), "Book Details for ID 9:");

        let present = Outcome::BookDetails {
            book_id: 1,
            details: Some(BookDetails {
                title: "Dune".to_string(),
                author: "Herrick".to_string(),
                isbn: "ISBN1".to_string(),
                available: false,
                borrow_count: 1,
            }),
        };
        assert_eq!(
            present.to_string(),
            "Book Details for ID 1:\n- \"Dune\" by Herrick, ISBN: ISBN1, Available: No"
        );
    }

    #[test]
    fn test_empty_available_list_is_well_formed() {
        let outcome = Outcome::AvailableBooks { books: Vec::new() };
        assert_eq!(outcome.to_string(), "Available Books:");
    }

    #[test]
    fn test_author_listing_distinguishes_empty() {
        let none = Outcome::BooksByAuthor { author: "Nobody".to_string(), books: Vec::new() };
        assert_eq!(none.to_string(), "No books found by Author \"Nobody\".");

        let some = Outcome::BooksByAuthor {
            author: "bar".to_string(),
            books: vec![listing(2, "Foo", "Bar"), listing(4, "Baz", "BAR")],
        };
        assert_eq!(
            some.to_string(),
            "Books by Author \"bar\":\n- Book ID 2: \"Foo\" by Bar\n- Book ID 4: \"Baz\" by BAR"
        );
    }

    #[test]
    fn test_patron_books_rendering() {
        let none = Outcome::PatronBooks { patron_id: 3, loans: Vec::new() };
        assert_eq!(none.to_string(), "Patron 3 has not borrowed any books.");

        let some = Outcome::PatronBooks {
            patron_id: 3,
            loans: vec![Loan { book_id: 1, title: "Dune".to_string() }],
        };
        assert_eq!(
            some.to_string(),
            "Patron 3 borrowed the following books:\n- \"Dune\" (Book ID: 1)"
        );
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = Outcome::Borrowed { patron_id: 10, book_id: 1, title: "Dune".to_string() };
        let json = serde_json::to_value(&outcome).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({
                "outcome": "borrowed",
                "patron_id": 10,
                "book_id": 1,
                "title": "Dune"
            }))
        );
    }
}
