use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Tag, UserProfile};
use crate::error::DomainError;

/// Publication state of a post. Only published posts are publicly visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::UnknownStatus {
                kind: "post",
                value: other.to_string(),
            }),
        }
    }
}

/// Post entity - represents a blog post or article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category_id: Option<i64>,
    pub author_id: Option<i64>,
    pub status: PostStatus,
    pub featured: bool,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Data needed to create a post. The store assigns id, timestamps and a zero view count.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category_id: Option<i64>,
    pub author_id: Option<i64>,
    pub status: PostStatus,
    pub featured: bool,
    /// Linked in the same write as the post. Duplicates are ignored.
    pub tag_ids: Vec<i64>,
}

impl NewPost {
    pub fn into_post(self, id: i64, now: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            excerpt: self.excerpt,
            featured_image: self.featured_image,
            category_id: self.category_id,
            author_id: self.author_id,
            status: self.status,
            featured: self.featured,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a post. Author and view count are not editable.
///
/// `None` leaves a field untouched. For the nullable fields `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub featured_image: Option<Option<String>>,
    pub category_id: Option<Option<i64>>,
    pub status: Option<PostStatus>,
    pub featured: Option<bool>,
    /// Replaces every tag link of the post when present. Applied by the store.
    pub tag_ids: Option<Vec<i64>>,
}

impl PostChanges {
    pub fn apply(self, post: &mut Post, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(image) = self.featured_image {
            post.featured_image = image;
        }
        if let Some(category_id) = self.category_id {
            post.category_id = category_id;
        }
        if let Some(status) = self.status {
            post.status = status;
        }
        if let Some(featured) = self.featured {
            post.featured = featured;
        }
        post.updated_at = now;
    }
}

/// Exact-match post filters, AND-combined. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category_id: Option<i64>,
    pub featured: Option<bool>,
    pub status: Option<PostStatus>,
}

impl PostFilter {
    pub fn published() -> Self {
        Self {
            status: Some(PostStatus::Published),
            ..Self::default()
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.category_id.is_none_or(|id| post.category_id == Some(id))
            && self.featured.is_none_or(|featured| post.featured == featured)
            && self.status.is_none_or(|status| post.status == status)
    }
}

/// Join row between a post and a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostTag {
    pub id: i64,
    pub post_id: i64,
    pub tag_id: i64,
}

/// A post decorated with its resolved relations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithRelations {
    #[serde(flatten)]
    pub post: Post,
    pub category: Option<Category>,
    pub author: Option<UserProfile>,
    pub tags: Vec<Tag>,
    /// Approved comments only.
    pub comment_count: usize,
}
