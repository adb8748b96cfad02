use crate::{
    records::{Book, BookId},
    tree::SearchTree,
};

/// Whether an insertion created a book or rewrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new node was attached to the tree
    Created,
    /// Title, author and ISBN of an existing book were overwritten
    Updated,
}

/// Books keyed by id in an unbalanced binary search tree
#[derive(Debug, Default)]
pub struct BookIndex {
    /// Backing tree
    tree: SearchTree<BookId, Book>,
}

impl BookIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a book, or overwrite the descriptive fields of the book already stored under `id`.
    ///
    /// Availability and borrow count of an existing book are kept.
    pub fn insert(&mut self, id: BookId, title: &str, author: &str, isbn: &str) -> Upsert {
        let created = self.tree.insert_with(id, Book::new(id, title, author, isbn), |book| {
            book.describe(title, author, isbn);
        });
        if created { Upsert::Created } else { Upsert::Updated }
    }

    /// Find a book by id
    #[must_use]
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.tree.get(&id)
    }

    /// Find a book by id for mutation
    pub fn get_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.tree.get_mut(&id)
    }

    /// Mark a book as shelved or on loan, returning false if `id` is unknown
    pub fn set_availability(&mut self, id: BookId, available: bool) -> bool {
        let Some(book) = self.get_mut(id) else {
            return false;
        };
        book.available = available;
        true
    }

    /// Count one more borrow of a book, returning the new count or `None` if `id` is unknown
    pub fn increment_borrow_count(&mut self, id: BookId) -> Option<u64> {
        self.get_mut(id).map(|book| {
            book.borrow_count = book.borrow_count.saturating_add(1);
            book.borrow_count
        })
    }

    /// Shelved books in ascending id order
    pub fn available(&self) -> impl Iterator<Item = &Book> {
        self.tree.values().filter(|book| book.available)
    }

    /// Books by `author` in ascending id order; a full scan since author is not a key
    pub fn by_author<'a>(&'a self, author: &'a str) -> impl Iterator<Item = &'a Book> {
        self.tree.values().filter(move |book| book.is_by(author))
    }

    /// All books in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.tree.values()
    }

    /// Number of books
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether no book has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Backing tree, for shape inspection
    #[must_use]
    pub fn tree(&self) -> &SearchTree<BookId, Book> {
        &self.tree
    }
}
