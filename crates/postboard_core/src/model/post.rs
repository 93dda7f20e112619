//! Post domain model.
//!
//! # Responsibility
//! - Define the canonical post record returned to every caller.
//! - Define typed request bodies for create, full replace and partial update.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another post.
//! - Request bodies never carry an id that the store trusts for placement.

use serde::{Deserialize, Serialize};

/// Store-assigned post identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PostId = i64;

/// Canonical post record.
///
/// Serialized as `{ "id": .., "title": .., "content": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned identity, immutable once assigned.
    pub id: PostId,
    pub title: String,
    pub content: String,
}

impl Post {
    /// Builds a post from an already-assigned id and a create body.
    pub fn from_create(id: PostId, data: PostCreate) -> Self {
        Self {
            id,
            title: data.title,
            content: data.content,
        }
    }

    /// Merges the present fields of `patch` into this post.
    ///
    /// Returns whether any field was written.
    pub fn apply_patch(&mut self, patch: PostPatch) -> bool {
        let mut changed = false;
        if let Some(title) = patch.title {
            self.title = title;
            changed = true;
        }
        if let Some(content) = patch.content {
            self.content = content;
            changed = true;
        }
        changed
    }
}

/// Request body for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
}

impl PostCreate {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Request body for replacing a post.
///
/// `id` must match the addressed id; the check belongs to the API tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReplace {
    pub id: PostId,
    pub title: String,
    pub content: String,
}

impl PostReplace {
    /// Drops the body id, leaving the fields the store actually writes.
    pub fn into_fields(self) -> PostCreate {
        PostCreate {
            title: self.title,
            content: self.content,
        }
    }
}

/// Request body for a partial update.
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostPatch {
    /// Returns `true` when no field would be updated.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{Post, PostCreate, PostPatch, PostReplace};

    #[test]
    fn apply_patch_only_touches_present_fields() {
        let mut post = Post::from_create(7, PostCreate::new("old title", "old body"));
        let changed = post.apply_patch(PostPatch {
            title: Some("new title".to_string()),
            content: None,
        });

        assert!(changed);
        assert_eq!(post.id, 7);
        assert_eq!(post.title, "new title");
        assert_eq!(post.content, "old body");
    }

    #[test]
    fn empty_patch_reports_no_change() {
        let mut post = Post::from_create(1, PostCreate::new("t", "c"));
        assert!(PostPatch::default().is_empty());
        assert!(!post.apply_patch(PostPatch::default()));
        assert_eq!(post, Post::from_create(1, PostCreate::new("t", "c")));
    }

    #[test]
    fn replace_body_drops_its_id() {
        let body = PostReplace {
            id: 99,
            title: "t".to_string(),
            content: "c".to_string(),
        };
        assert_eq!(body.into_fields(), PostCreate::new("t", "c"));
    }

    #[test]
    fn patch_deserializes_with_missing_fields() {
        let patch: PostPatch = serde_json::from_str(r#"{"content":"only body"}"#).unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.content.as_deref(), Some("only body"));
    }
}
