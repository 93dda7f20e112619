//! Core domain logic for Postboard.
//! This crate is the single source of truth for post store invariants.

pub mod api;
pub mod config;
pub mod datefmt;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use api::{ApiError, ApiResult, PostsApi};
pub use config::{ConfigError, CoreConfig};
pub use datefmt::{
    format_date, parse_date_string, DateFormatError, DateNotice, DateRequest, FormattedDate,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::post::{Post, PostCreate, PostId, PostPatch, PostReplace};
pub use repo::post_repo::{InMemoryPostRepository, PostRepository, RepoError, RepoResult};
pub use service::post_service::{PostService, PostServiceError, PostServiceResult};
pub use service::shared::SharedPostService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
