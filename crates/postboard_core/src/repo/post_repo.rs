//! Post repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the authoritative ordered collection of posts.
//! - Assign monotonically increasing ids on create.
//!
//! # Invariants
//! - `list_all` returns posts in insertion order.
//! - `replace` and `patch` keep the post at its existing position.
//! - Ids are never reused, even after delete.
//! - Callers only ever receive owned copies.

use crate::model::post::{Post, PostCreate, PostId, PostPatch};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for post lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// No post currently held has this id.
    NotFound(PostId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "post not found: {id}"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    fn list_all(&self) -> Vec<Post>;
    fn get(&self, id: PostId) -> RepoResult<Post>;
    fn create(&mut self, data: PostCreate) -> Post;
    fn replace(&mut self, id: PostId, data: PostCreate) -> RepoResult<Post>;
    fn patch(&mut self, id: PostId, patch: PostPatch) -> RepoResult<Post>;
    fn delete(&mut self, id: PostId) -> RepoResult<()>;
}

/// In-memory post repository.
///
/// Not internally synchronized; see `SharedPostService` for concurrent use.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: Vec<Post>,
    last_post_id: PostId,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of posts currently held.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Last id handed out, `0` before the first create.
    pub fn last_post_id(&self) -> PostId {
        self.last_post_id
    }

    fn position(&self, id: PostId) -> RepoResult<usize> {
        self.posts
            .iter()
            .position(|post| post.id == id)
            .ok_or(RepoError::NotFound(id))
    }
}

impl PostRepository for InMemoryPostRepository {
    fn list_all(&self) -> Vec<Post> {
        self.posts.clone()
    }

    fn get(&self, id: PostId) -> RepoResult<Post> {
        let index = self.position(id)?;
        Ok(self.posts[index].clone())
    }

    fn create(&mut self, data: PostCreate) -> Post {
        self.last_post_id += 1;
        let post = Post::from_create(self.last_post_id, data);
        self.posts.push(post.clone());
        post
    }

    fn replace(&mut self, id: PostId, data: PostCreate) -> RepoResult<Post> {
        let index = self.position(id)?;
        let post = Post::from_create(id, data);
        self.posts[index] = post.clone();
        Ok(post)
    }

    fn patch(&mut self, id: PostId, patch: PostPatch) -> RepoResult<Post> {
        let index = self.position(id)?;
        let post = &mut self.posts[index];
        post.apply_patch(patch);
        Ok(post.clone())
    }

    fn delete(&mut self, id: PostId) -> RepoResult<()> {
        let index = self.position(id)?;
        self.posts.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryPostRepository, PostRepository, RepoError};
    use crate::model::post::{PostCreate, PostPatch};

    #[test]
    fn counter_starts_at_zero_and_first_id_is_one() {
        let mut repo = InMemoryPostRepository::new();
        assert_eq!(repo.last_post_id(), 0);
        let post = repo.create(PostCreate::new("a", "b"));
        assert_eq!(post.id, 1);
        assert_eq!(repo.last_post_id(), 1);
    }

    #[test]
    fn patch_keeps_position() {
        let mut repo = InMemoryPostRepository::new();
        repo.create(PostCreate::new("one", "1"));
        repo.create(PostCreate::new("two", "2"));
        repo.create(PostCreate::new("three", "3"));

        let patched = repo
            .patch(
                2,
                PostPatch {
                    title: None,
                    content: Some("patched".to_string()),
                },
            )
            .unwrap();
        assert_eq!(patched.title, "two");
        assert_eq!(patched.content, "patched");

        let ids: Vec<_> = repo.list_all().iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn returned_posts_are_detached_copies() {
        let mut repo = InMemoryPostRepository::new();
        let mut created = repo.create(PostCreate::new("title", "body"));
        created.title = "mutated by caller".to_string();

        assert_eq!(repo.get(1).unwrap().title, "title");
    }

    #[test]
    fn not_found_display_carries_id() {
        assert_eq!(RepoError::NotFound(42).to_string(), "post not found: 42");
    }
}
