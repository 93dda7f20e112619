//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate storage details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return the semantic `NotFound` error for absent ids.

pub mod post_repo;
