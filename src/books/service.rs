//! Read-through book service.

use std::sync::Arc;

use tracing::debug;

use crate::books::{Book, BookRepository, NewBook};
use crate::cache::CacheStore;
use crate::error::{CacheError, Result};

/// Cache of books keyed by id.
pub type BookCache = CacheStore<i64, Book>;

// == Book Service ==
/// Serves book reads from the cache, falling back to the repository.
///
/// The service does not own the cache; it is handed a shared instance built
/// once at startup.
#[derive(Debug, Clone)]
pub struct BookService {
    repository: Arc<BookRepository>,
    cache: Arc<BookCache>,
}

impl BookService {
    pub fn new(repository: Arc<BookRepository>, cache: Arc<BookCache>) -> Self {
        Self { repository, cache }
    }

    /// Stores a new book. The cache is filled on first read, not here.
    pub fn create(&self, new_book: NewBook) -> Result<Book> {
        let book = self.repository.create(new_book)?;
        debug!(id = book.id, "book created");
        Ok(book)
    }

    // == Get ==
    /// Returns a book, caching it on a miss.
    pub fn get(&self, id: i64) -> Result<Book> {
        if let Some(book) = self.cache.get(&id) {
            debug!(id, "book served from cache");
            return Ok(book);
        }

        let book = self
            .repository
            .get(id)
            .ok_or_else(|| CacheError::NotFound(format!("book {}", id)))?;
        self.cache.set(id, book.clone());
        debug!(id, "book loaded into cache");
        Ok(book)
    }

    // == Delete ==
    /// Deletes a book and drops it from the cache.
    pub fn delete(&self, id: i64) -> Result<()> {
        self.cache.remove(&id);
        if self.repository.delete(id) {
            debug!(id, "book deleted");
            Ok(())
        } else {
            Err(CacheError::NotFound(format!("book {}", id)))
        }
    }

    /// Flushes every cached book, returning how many were cached.
    /// Stored books are untouched.
    pub fn clear_cache(&self) -> usize {
        self.cache.clear()
    }

    pub fn cache(&self) -> &BookCache {
        &self.cache
    }
}
