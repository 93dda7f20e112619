//! Domain model for the posts resource.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Define typed request bodies so field presence is checked at compile time.
//!
//! # Invariants
//! - Every post is identified by a store-assigned `PostId`.
//! - Deletion is a hard removal; ids are still never reused.

pub mod post;
