use crate::events::CatalogEvent;

/// Trait for catalog change observation
pub trait CatalogObserver {
    /// Called after a mutation has been applied to the catalog
    fn on_event(&self, event: &CatalogEvent);
}

/// Logs every catalog change through `tracing`
#[derive(Debug, Default)]
pub struct TracingObserver;

impl CatalogObserver for TracingObserver {
    fn on_event(&self, event: &CatalogEvent) {
        match event {
            CatalogEvent::Borrowed { book_id, patron_id, borrow_count } => {
                tracing::info!(book_id, patron_id, borrow_count, "book borrowed");
            }
            CatalogEvent::Returned { book_id, patron_id } => {
                tracing::info!(book_id, patron_id, "book returned");
            }
            CatalogEvent::PatronAutoCreated { patron_id } => {
                tracing::info!(patron_id, "created placeholder patron for borrow");
            }
            CatalogEvent::BookAdded { book_id } => tracing::debug!(book_id, "book added"),
            CatalogEvent::BookUpdated { book_id } => tracing::debug!(book_id, "book updated"),
            CatalogEvent::PatronAdded { patron_id } => tracing::debug!(patron_id, "patron added"),
        }
    }
}
