//! Shared data models for the Dream Desk backend.
//!
//! This crate provides Serde-serializable types for:
//! - Job postings and job applications
//! - Validated request bodies for the write endpoints
//! - Opaque document identifiers

pub mod application;
pub mod job;
pub mod oid;

// Re-export common types
pub use application::{Application, NewApplication, StatusUpdate};
pub use job::{Job, NewJob};
pub use oid::{InvalidObjectId, ObjectId};
