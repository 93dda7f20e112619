//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the API tier decoupled from storage details.

pub mod post_service;
pub mod shared;
