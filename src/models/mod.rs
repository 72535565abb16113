//! Request and Response models for the book service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::CreateBookRequest;
pub use responses::{
    BookResponse, ClearCacheResponse, ErrorResponse, HealthResponse, StatsResponse,
};
