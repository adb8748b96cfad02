use serde::{Deserialize, Serialize};

/// Primary key of a book
pub type BookId = i64;

/// Primary key of a patron
pub type PatronId = i64;

/// A single book held by the library
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Sort key of the book index, never changes once the book exists
    pub id: BookId,
    /// Title shown in every report
    pub title: String,
    /// Author as given on insertion, untrimmed
    pub author: String,
    /// ISBN kept as raw text
    pub isbn: String,
    /// True while the book is on the shelf
    pub available: bool,
    /// Number of successful borrows, never reset
    pub borrow_count: u64,
}

impl Book {
    /// Create a shelved book that has never been borrowed
    #[must_use]
    pub fn new(id: BookId, title: &str, author: &str, isbn: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            available: true,
            borrow_count: 0,
        }
    }

    /// Overwrite the descriptive fields, leaving loan state untouched
    pub fn describe(&mut self, title: &str, author: &str, isbn: &str) {
        title.clone_into(&mut self.title);
        author.clone_into(&mut self.author);
        isbn.clone_into(&mut self.isbn);
    }

    /// Whether this book was written by `name`, ignoring case and surrounding whitespace
    #[must_use]
    pub fn is_by(&self, name: &str) -> bool {
        self.author.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// A library member
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Patron {
    /// Sort key of the patron index
    pub id: PatronId,
    /// Display name
    pub name: String,
    /// Books currently on loan to this patron, in borrow order
    pub borrowed: Vec<BookId>,
}

impl Patron {
    /// Create a patron with nothing on loan
    #[must_use]
    pub fn new(id: PatronId, name: &str) -> Self {
        Self { id, name: name.to_string(), borrowed: Vec::new() }
    }

    /// Patron created implicitly by a borrow, named after its id
    #[must_use]
    pub fn placeholder(id: PatronId) -> Self {
        Self::new(id, &format!("Patron {id}"))
    }

    /// Whether `book_id` is currently on loan to this patron
    #[must_use]
    pub fn holds(&self, book_id: BookId) -> bool {
        self.borrowed.contains(&book_id)
    }

    /// Drop one occurrence of `book_id` from the loan list, returning whether it was there
    pub fn release(&mut self, book_id: BookId) -> bool {
        match self.borrowed.iter().position(|held| *held == book_id) {
            Some(pos) => {
                self.borrowed.remove(pos);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_match_ignores_case_and_padding() {
        let book = Book::new(1, "Title", " Jane Doe ", "ISBN");
        assert!(book.is_by("jane doe"));
        assert!(book.is_by("  JANE DOE"));
        assert!(!book.is_by("Jane"));
    }

    #[test]
    fn test_release_removes_single_occurrence() {
        let mut patron = Patron::new(7, "Ann");
        patron.borrowed = vec![3, 4, 3];

        assert!(patron.release(3));
        assert_eq!(patron.borrowed, vec![4, 3]);
        assert!(!patron.release(9));
    }

    #[test]
    fn test_placeholder_name() {
        assert_eq!(Patron::placeholder(42).name, "Patron 42");
    }
}
