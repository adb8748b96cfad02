use std::{collections::VecDeque, fmt};

use crate::{
    book_index::{BookIndex, Upsert},
    command::Command,
    error::{CatalogError, ErrorKind},
    events::CatalogEvent,
    observers::CatalogObserver,
    patron_index::PatronIndex,
    records::{BookId, PatronId},
    report::{BookDetails, Listing, Loan, Outcome},
};

/// Tunables of a [`LibraryCatalog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Maximum number of events kept in the history, oldest dropped first
    pub history_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { history_limit: 100 }
    }
}

/// Book and patron indexes plus the operations spanning both
pub struct LibraryCatalog {
    /// Books keyed by id
    books: BookIndex,
    /// Patrons keyed by id
    patrons: PatronIndex,
    /// Most recent events, oldest first
    history: VecDeque<CatalogEvent>,
    /// Tunables
    config: CatalogConfig,
    /// Registered change observers
    observers: Vec<Box<dyn CatalogObserver>>,
}

impl fmt::Debug for LibraryCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryCatalog")
            .field("books", &self.books)
            .field("patrons", &self.patrons)
            .field("history", &self.history)
            .field("config", &self.config)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for LibraryCatalog {
    fn default() -> Self {
        Self::with_config(CatalogConfig::default())
    }
}

impl LibraryCatalog {
    /// Create an empty catalog with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog
    #[must_use]
    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            books: BookIndex::new(),
            patrons: PatronIndex::new(),
            history: VecDeque::with_capacity(config.history_limit.min(1024)),
            config,
            observers: Vec::new(),
        }
    }

    /// Register an observer to be notified of every change
    pub fn register_observer(&mut self, observer: Box<dyn CatalogObserver>) {
        self.observers.push(observer);
    }

    /// Book index
    #[must_use]
    pub fn books(&self) -> &BookIndex {
        &self.books
    }

    /// Patron index
    #[must_use]
    pub fn patrons(&self) -> &PatronIndex {
        &self.patrons
    }

    /// Most recent changes, oldest first
    #[must_use]
    pub fn history(&self) -> &VecDeque<CatalogEvent> {
        &self.history
    }

    /// Run one parsed command
    ///
    /// # Errors
    ///
    /// Returns the error of [`Self::borrow_book`] or [`Self::return_book`]
    /// when the command is a borrow or a return that is refused.
    pub fn execute(&mut self, command: &Command) -> Result<Outcome, CatalogError> {
        match command {
            Command::AddBook { book_id, title, author, isbn } => {
                Ok(self.add_book(*book_id, title, author, isbn))
            }
            Command::AddPatron { patron_id, name } => Ok(self.add_patron(*patron_id, name)),
            Command::BorrowBook { book_id, patron_id } => self.borrow_book(*book_id, *patron_id),
            Command::ReturnBook { book_id, patron_id } => self.return_book(*book_id, *patron_id),
            Command::CheckBook { book_id } => Ok(self.check_book(*book_id)),
            Command::ListAvailableBooks => Ok(self.list_available_books()),
            Command::ListBooksByAuthor { author } => Ok(self.list_books_by_author(author)),
            Command::ListPatronsBooks { patron_id } => Ok(self.list_patron_books(*patron_id)),
        }
    }

    /// Add a book, or rewrite title, author and ISBN of the book already under `book_id`
    pub fn add_book(&mut self, book_id: BookId, title: &str, author: &str, isbn: &str) -> Outcome {
        let upsert = self.books.insert(book_id, title, author, isbn);
        self.record(match upsert {
            Upsert::Created => CatalogEvent::BookAdded { book_id },
            Upsert::Updated => CatalogEvent::BookUpdated { book_id },
        });
        Outcome::BookAdded {
            book_id,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            updated: upsert == Upsert::Updated,
        }
    }

    /// Add a patron; an existing patron under `patron_id` keeps its name
    pub fn add_patron(&mut self, patron_id: PatronId, name: &str) -> Outcome {
        let created = self.patrons.insert(patron_id, name);
        if created {
            self.record(CatalogEvent::PatronAdded { patron_id });
        }
        let name = self.patrons.get(patron_id).map_or_else(|| name.to_string(), |p| p.name.clone());
        Outcome::PatronAdded { patron_id, name, created }
    }

    /// Lend a shelved book, creating a placeholder patron for an unknown `patron_id`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotAvailable` if the book is unknown or already on loan.
    /// Nothing is changed in that case, and no patron is created.
    pub fn borrow_book(
        &mut self,
        book_id: BookId,
        patron_id: PatronId,
    ) -> Result<Outcome, CatalogError> {
        let title = match self.books.get(book_id) {
            None => return Err(CatalogError::NotAvailable { book_id, kind: ErrorKind::NotFound }),
            Some(book) if !book.available => {
                return Err(CatalogError::NotAvailable {
                    book_id,
                    kind: ErrorKind::AlreadyUnavailable,
                });
            }
            Some(book) => book.title.clone(),
        };

        let auto_created = !self.patrons.contains(patron_id);
        self.patrons.get_or_insert(patron_id).borrowed.push(book_id);
        if auto_created {
            self.record(CatalogEvent::PatronAutoCreated { patron_id });
        }

        self.books.set_availability(book_id, false);
        let borrow_count = self.books.increment_borrow_count(book_id).unwrap_or_default();
        self.record(CatalogEvent::Borrowed { book_id, patron_id, borrow_count });

        Ok(Outcome::Borrowed { patron_id, book_id, title })
    }

    /// Take back a book from the patron holding it
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotBorrowed` if the book is unknown or on the shelf,
    /// and `CatalogError::NotBorrowedBy` if the patron is unknown or does not hold
    /// this book. Nothing is changed in either case.
    pub fn return_book(
        &mut self,
        book_id: BookId,
        patron_id: PatronId,
    ) -> Result<Outcome, CatalogError> {
        let title = match self.books.get(book_id) {
            None => return Err(CatalogError::NotBorrowed { book_id, kind: ErrorKind::NotFound }),
            Some(book) if book.available => {
                return Err(CatalogError::NotBorrowed {
                    book_id,
                    kind: ErrorKind::AlreadyAvailable,
                });
            }
            Some(book) => book.title.clone(),
        };

        let Some(patron) = self.patrons.get_mut(patron_id) else {
            return Err(CatalogError::NotBorrowedBy {
                book_id,
                patron_id,
                kind: ErrorKind::NotFound,
            });
        };
        if !patron.release(book_id) {
            return Err(CatalogError::NotBorrowedBy {
                book_id,
                patron_id,
                kind: ErrorKind::OwnershipMismatch,
            });
        }

        self.books.set_availability(book_id, true);
        self.record(CatalogEvent::Returned { book_id, patron_id });

        Ok(Outcome::Returned { patron_id, book_id, title })
    }

    /// Describe one book
    #[must_use]
    pub fn check_book(&self, book_id: BookId) -> Outcome {
        Outcome::BookDetails { book_id, details: self.books.get(book_id).map(BookDetails::from) }
    }

    /// Every shelved book in ascending id order
    #[must_use]
    pub fn list_available_books(&self) -> Outcome {
        Outcome::AvailableBooks { books: self.books.available().map(Listing::from).collect() }
    }

    /// Every book whose author matches `author`, ignoring case and surrounding whitespace
    #[must_use]
    pub fn list_books_by_author(&self, author: &str) -> Outcome {
        Outcome::BooksByAuthor {
            author: author.to_string(),
            books: self.books.by_author(author).map(Listing::from).collect(),
        }
    }

    /// Books held by a patron, in borrow order
    #[must_use]
    pub fn list_patron_books(&self, patron_id: PatronId) -> Outcome {
        let loans = self
            .patrons
            .get(patron_id)
            .map(|patron| {
                patron
                    .borrowed
                    .iter()
                    .filter_map(|&book_id| {
                        let book = self.books.get(book_id);
                        if book.is_none() {
                            tracing::warn!(patron_id, book_id, "loan refers to an unknown book");
                        }
                        book.map(|book| Loan { book_id, title: book.title.clone() })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Outcome::PatronBooks { patron_id, loans }
    }

    /// Append an event to the history and notify observers
    fn record(&mut self, event: CatalogEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
        if self.config.history_limit == 0 {
            return;
        }
        if self.history.len() >= self.config.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(event);
    }
}
