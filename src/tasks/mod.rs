//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Expiry: fires the expiries armed by cache reads and writes

mod expiry;

pub use expiry::spawn_expiry_task;
