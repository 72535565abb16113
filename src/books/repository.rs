//! In-memory book record store.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::books::{Book, NewBook};
use crate::error::{CacheError, Result};

#[derive(Debug)]
struct Table {
    rows: HashMap<i64, Book>,
    next_id: i64,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next_id: 1,
        }
    }
}

// == Book Repository ==
/// Book records keyed by an auto-incremented integer id.
///
/// Names and authors are unique across the table. Ids are never reused.
#[derive(Debug, Default)]
pub struct BookRepository {
    table: RwLock<Table>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // == Create ==
    /// Validates and stores a new book, assigning it the next id.
    pub fn create(&self, new_book: NewBook) -> Result<Book> {
        if let Some(message) = new_book.validate() {
            return Err(CacheError::InvalidRequest(message));
        }

        let mut table = self.table.write();
        if let Some(existing) = table
            .rows
            .values()
            .find(|b| b.name == new_book.name || b.author == new_book.author)
        {
            let field = if existing.name == new_book.name {
                "name"
            } else {
                "author"
            };
            return Err(CacheError::InvalidRequest(format!(
                "A book with this {} already exists",
                field
            )));
        }

        let id = table.next_id;
        table.next_id += 1;
        let book = new_book.with_id(id);
        table.rows.insert(id, book.clone());
        Ok(book)
    }

    // == Get ==
    pub fn get(&self, id: i64) -> Option<Book> {
        self.table.read().rows.get(&id).cloned()
    }

    // == Delete ==
    /// Deletes a book. Returns whether it existed.
    pub fn delete(&self, id: i64) -> bool {
        self.table.write().rows.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().rows.is_empty()
    }
}
