//! Data API client for the Dream Desk document database.
//!
//! This crate provides:
//! - Typed repositories for job postings and job applications
//! - A reqwest-based client for the database's HTTPS Data API
//! - Extended-JSON identifier handling
//! - Retry with exponential backoff and jitter
//!
//! There is no startup connection step: a misconfigured or unreachable database
//! surfaces lazily, per request, as a [`StoreError`].

pub mod applications;
pub mod client;
pub mod error;
pub mod jobs;
pub mod metrics;
pub mod retry;
pub mod types;

pub use applications::ApplicationRepository;
pub use client::{StoreClient, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use jobs::JobRepository;
pub use types::{InsertedId, UpdateReport};
