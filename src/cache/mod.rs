//! Cache module for storing fetched API responses in memory
//!
//! This module provides an in-memory cache that keeps fetched values together
//! with the timestamp of the last successful fetch. It supports graceful
//! degradation by returning expired entries with an `is_expired` flag, allowing
//! the application to use stale data when upstream sources are unavailable.

mod store;

pub use store::{CachedData, MemoryCache, DEFAULT_TTL};
