//! Business logic services.

pub mod enrichment;

pub use enrichment::EnrichmentService;
