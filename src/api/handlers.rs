//! API Handlers
//!
//! HTTP request handlers for each book service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tokio::task::JoinHandle;

use crate::books::{BookCache, BookRepository, BookService};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    BookResponse, ClearCacheResponse, CreateBookRequest, HealthResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the one book service of the process; cloning shares the same
/// repository and cache.
#[derive(Clone)]
pub struct AppState {
    pub books: BookService,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(books: BookService) -> Self {
        Self { books }
    }

    /// Builds the repository and the cache from configuration, and starts
    /// the cache's expiry task.
    ///
    /// Fails if the cache parameters are invalid. Must be called from within
    /// a tokio runtime.
    pub fn from_config(config: &Config) -> Result<(Self, JoinHandle<()>)> {
        let (cache, expiry_handle) = BookCache::start(config.cache_config()?);
        let books = BookService::new(Arc::new(BookRepository::new()), cache);
        Ok((Self::new(books), expiry_handle))
    }
}

/// Handler for POST /books
///
/// Stores a new book and returns it with its assigned id.
pub async fn create_book_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>)> {
    let book = state.books.create(req.into())?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

/// Handler for GET /books/:id
///
/// Returns a book, served from the cache when possible.
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookResponse>> {
    let book = state.books.get(id)?;
    Ok(Json(book.into()))
}

/// Handler for DELETE /books/:id
///
/// Deletes a book and drops it from the cache.
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.books.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /cache/clear
///
/// Flushes the cache. Stored books are kept.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.books.clear_cache();
    Json(ClearCacheResponse::new(cleared))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.books.cache();
    Json(StatsResponse::new(&cache.stats(), cache.capacity()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
