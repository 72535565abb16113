//! API Module
//!
//! HTTP handlers and routing for the book service REST API.
//!
//! # Endpoints
//! - `POST /books` - Store a new book
//! - `GET /books/:id` - Retrieve a book
//! - `DELETE /books/:id` - Delete a book
//! - `POST /cache/clear` - Flush the cache
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
