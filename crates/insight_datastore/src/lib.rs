//! # DataStore Module
//!
//! This module provides functionality for persisting summary records and
//! retrieving them by recency or id.
//!
//! Two interchangeable backends implement the [`DataStore`] trait: a durable
//! Postgres store (via sqlx) used in normal operation, and an append-only
//! in-memory store used in test mode. The backend is selected once at process
//! startup; callers only ever see the trait.

mod datastore;
mod domain;

pub use datastore::memory::MemoryDataStore;
pub use datastore::postgres::PgDataStore;
pub use datastore::DataStore;
pub use domain::{NewSummary, SummaryRecord};
