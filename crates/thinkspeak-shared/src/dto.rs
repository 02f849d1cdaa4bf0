//! Data Transfer Objects - request/response types for the API.
//!
//! Create bodies carry every required field; patch bodies make every field
//! optional and leave absent ones untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};
use validator::Validate;

use thinkspeak_core::domain::{
    CategoryChanges, CommentChanges, CommentStatus, NewCategory, NewComment, NewPost, NewTag,
    PostChanges, PostStatus, TagChanges, UserProfile,
};

/// Blank optional text is treated as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Keeps an explicit `null` apart from a missing field: missing is `None`
/// (via `#[serde(default)]`), `null` is `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query parameter that counts as unset when empty, so `?postId=` means no filter.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

// --- Auth ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub session_id: String,
    pub user: UserProfile,
}

// --- Posts ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Derived from the title when blank.
    #[serde(default)]
    #[validate(length(max = 200, message = "Slug must be at most 200 characters"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Excerpt must be at most 500 characters"))]
    pub excerpt: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2048, message = "Image URL is too long"))]
    pub featured_image: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, message = "Category id must be positive"))]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tag_ids: Option<Vec<i64>>,
}

impl PostInput {
    pub fn excerpt(&self) -> Option<String> {
        non_blank(self.excerpt.clone())
    }

    pub fn featured_image(&self) -> Option<String> {
        non_blank(self.featured_image.clone())
    }

    pub fn into_new_post(self, slug: String, author_id: i64) -> NewPost {
        NewPost {
            excerpt: self.excerpt(),
            featured_image: self.featured_image(),
            title: self.title,
            slug,
            content: self.content,
            category_id: self.category_id,
            author_id: Some(author_id),
            status: self.status,
            featured: self.featured,
            tag_ids: self.tag_ids.unwrap_or_default(),
        }
    }
}

/// `null` clears `excerpt`, `featuredImage` and `categoryId`; blank text does too.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Slug must be 1-200 characters"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 500, message = "Excerpt must be at most 500 characters"))]
    pub excerpt: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2048, message = "Image URL is too long"))]
    pub featured_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 1, message = "Category id must be positive"))]
    pub category_id: Option<Option<i64>>,
    pub status: Option<PostStatus>,
    pub featured: Option<bool>,
    /// Replaces the post's tags when present.
    pub tag_ids: Option<Vec<i64>>,
}

impl PostPatch {
    /// Category the patch points the post at, if any.
    pub fn new_category(&self) -> Option<i64> {
        self.category_id.flatten()
    }

    pub fn into_changes(self) -> PostChanges {
        PostChanges {
            title: self.title,
            slug: self.slug,
            content: self.content,
            excerpt: self.excerpt.map(non_blank),
            featured_image: self.featured_image.map(non_blank),
            category_id: self.category_id,
            status: self.status,
            featured: self.featured,
            tag_ids: self.tag_ids,
        }
    }
}

/// Query string of post listings. `category` is also accepted as `categoryId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostQuery {
    #[serde(default, alias = "categoryId", deserialize_with = "empty_as_none")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<PostStatus>,
}

// --- Categories & tags ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl From<CategoryInput> for NewCategory {
    fn from(input: CategoryInput) -> Self {
        Self {
            name: input.name,
            description: non_blank(input.description),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CategoryPatch {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl From<CategoryPatch> for CategoryChanges {
    fn from(patch: CategoryPatch) -> Self {
        Self {
            name: patch.name,
            description: patch.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
}

impl From<TagInput> for NewTag {
    fn from(input: TagInput) -> Self {
        Self { name: input.name }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TagPatch {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: Option<String>,
}

impl From<TagPatch> for TagChanges {
    fn from(patch: TagPatch) -> Self {
        Self { name: patch.name }
    }
}

// --- Comments ---

/// Public comment submission. New comments always start pending.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    #[validate(range(min = 1, message = "Post id must be positive"))]
    pub post_id: i64,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,
}

impl From<CommentInput> for NewComment {
    fn from(input: CommentInput) -> Self {
        Self {
            post_id: input.post_id,
            name: input.name,
            email: input.email,
            content: input.content,
            status: CommentStatus::Pending,
        }
    }
}

/// Admin moderation edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CommentPatch {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: Option<String>,
    pub status: Option<CommentStatus>,
}

impl From<CommentPatch> for CommentChanges {
    fn from(patch: CommentPatch) -> Self {
        Self {
            name: patch.name,
            email: patch.email,
            content: patch.content,
            status: patch.status,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub post_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<CommentStatus>,
}

// --- Contact ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}
