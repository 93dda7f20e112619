//! Mutex-guarded post service for concurrent callers.
//!
//! # Responsibility
//! - Serialize every store operation behind one lock.
//! - Allow cheap cloning into request handlers.
//!
//! # Invariants
//! - The id increment and append of `create` happen under one lock hold.
//! - A poisoned lock is recovered; every mutation is a single `Vec`
//!   operation after the lookup, so no half-applied state can be observed.

use crate::model::post::{Post, PostCreate, PostId, PostPatch};
use crate::repo::post_repo::{InMemoryPostRepository, PostRepository};
use crate::service::post_service::{PostService, PostServiceResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared handle to one `PostService`.
pub struct SharedPostService<R: PostRepository> {
    inner: Arc<Mutex<PostService<R>>>,
}

impl<R: PostRepository> Clone for SharedPostService<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedPostService<InMemoryPostRepository> {
    /// Builds an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(PostService::new(InMemoryPostRepository::new()))
    }
}

impl<R: PostRepository> SharedPostService<R> {
    pub fn new(service: PostService<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PostService<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list_posts(&self) -> Vec<Post> {
        self.lock().list_posts()
    }

    pub fn get_post(&self, id: PostId) -> PostServiceResult<Post> {
        self.lock().get_post(id)
    }

    pub fn create_post(&self, data: PostCreate) -> Post {
        self.lock().create_post(data)
    }

    pub fn replace_post(&self, id: PostId, data: PostCreate) -> PostServiceResult<Post> {
        self.lock().replace_post(id, data)
    }

    pub fn patch_post(&self, id: PostId, patch: PostPatch) -> PostServiceResult<Post> {
        self.lock().patch_post(id, patch)
    }

    pub fn delete_post(&self, id: PostId) -> PostServiceResult<()> {
        self.lock().delete_post(id)
    }

    /// Runs `f` with exclusive access to the service.
    ///
    /// Use for multi-step sequences that must not interleave with other callers.
    pub fn with_service<T>(&self, f: impl FnOnce(&mut PostService<R>) -> T) -> T {
        let mut guard = self.lock();
        f(&mut *guard)
    }
}
