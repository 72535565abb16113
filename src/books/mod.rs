//! Books Module
//!
//! The record service the cache sits in front of: book records, an
//! in-memory record store keyed by integer id, and a read-through service.

mod model;
mod repository;
mod service;

pub use model::{Book, NewBook, MAX_FIELD_LENGTH};
pub use repository::BookRepository;
pub use service::{BookCache, BookService};
