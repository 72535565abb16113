//! Book Cache - a small book record service fronted by an in-process cache
//!
//! The cache keeps a bounded number of books, evicting the least recently
//! used one when full and expiring any book left untouched for its TTL.

pub mod api;
pub mod books;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::{CacheConfig, Config};
pub use tasks::spawn_expiry_task;
