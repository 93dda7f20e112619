//! Post use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate storage to repository implementations.
//! - Emit metadata-only diagnostic events for every mutation.
//!
//! # Invariants
//! - Service APIs never bypass repository contracts.
//! - Post titles and content never reach the log.

use crate::model::post::{Post, PostCreate, PostId, PostPatch};
use crate::repo::post_repo::{PostRepository, RepoError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PostServiceResult<T> = Result<T, PostServiceError>;

/// Service error for post use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostServiceError {
    /// Target post does not exist.
    PostNotFound(PostId),
    /// Partial update carried no fields.
    EmptyPatch,
}

impl Display for PostServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostNotFound(id) => write!(f, "post not found: {id}"),
            Self::EmptyPatch => write!(f, "patch carries no fields to update"),
        }
    }
}

impl Error for PostServiceError {}

impl From<RepoError> for PostServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::PostNotFound(id),
        }
    }
}

/// Use-case service wrapper for post CRUD operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Read-only access to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists all posts in insertion order.
    pub fn list_posts(&self) -> Vec<Post> {
        let posts = self.repo.list_all();
        debug!(
            "event=post_list module=service status=ok count={}",
            posts.len()
        );
        posts
    }

    /// Gets one post by id.
    pub fn get_post(&self, id: PostId) -> PostServiceResult<Post> {
        self.repo
            .get(id)
            .map_err(|err| log_not_found("post_get", err))
    }

    /// Creates a post and returns the stored copy.
    pub fn create_post(&mut self, data: PostCreate) -> Post {
        let post = self.repo.create(data);
        info!(
            "event=post_create module=service status=ok post_id={}",
            post.id
        );
        post
    }

    /// Replaces all fields of a post except its id.
    ///
    /// The stored id is always `id`, never a caller-supplied body id.
    pub fn replace_post(&mut self, id: PostId, data: PostCreate) -> PostServiceResult<Post> {
        let post = self
            .repo
            .replace(id, data)
            .map_err(|err| log_not_found("post_replace", err))?;
        info!("event=post_replace module=service status=ok post_id={id}");
        Ok(post)
    }

    /// Merges the present fields of `patch` into a post.
    ///
    /// # Errors
    /// - `EmptyPatch` when no field is present; the store is not touched.
    /// - `PostNotFound` when `id` is absent.
    pub fn patch_post(&mut self, id: PostId, patch: PostPatch) -> PostServiceResult<Post> {
        if patch.is_empty() {
            warn!(
                "event=post_patch module=service status=error error_code=empty_patch post_id={id}"
            );
            return Err(PostServiceError::EmptyPatch);
        }

        let post = self
            .repo
            .patch(id, patch)
            .map_err(|err| log_not_found("post_patch", err))?;
        info!("event=post_patch module=service status=ok post_id={id}");
        Ok(post)
    }

    /// Removes a post.
    pub fn delete_post(&mut self, id: PostId) -> PostServiceResult<()> {
        self.repo
            .delete(id)
            .map_err(|err| log_not_found("post_delete", err))?;
        info!("event=post_delete module=service status=ok post_id={id}");
        Ok(())
    }
}

fn log_not_found(event: &str, err: RepoError) -> PostServiceError {
    let RepoError::NotFound(id) = &err;
    warn!("event={event} module=service status=error error_code=post_not_found post_id={id}");
    err.into()
}
