use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Moderation state of a comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Pending => "pending",
            CommentStatus::Approved => "approved",
            CommentStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CommentStatus::Pending),
            "approved" => Ok(CommentStatus::Approved),
            "rejected" => Ok(CommentStatus::Rejected),
            other => Err(DomainError::UnknownStatus {
                kind: "comment",
                value: other.to_string(),
            }),
        }
    }
}

/// Comment entity - a reader's reply attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub content: String,
    pub status: CommentStatus,
}

impl NewComment {
    pub fn into_comment(self, id: i64, now: DateTime<Utc>) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            name: self.name,
            email: self.email,
            content: self.content,
            status: self.status,
            created_at: now,
        }
    }
}

/// Moderation edit. The parent post cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct CommentChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub content: Option<String>,
    pub status: Option<CommentStatus>,
}

impl CommentChanges {
    pub fn apply(self, comment: &mut Comment) {
        if let Some(name) = self.name {
            comment.name = name;
        }
        if let Some(email) = self.email {
            comment.email = email;
        }
        if let Some(content) = self.content {
            comment.content = content;
        }
        if let Some(status) = self.status {
            comment.status = status;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentFilter {
    pub post_id: Option<i64>,
    pub status: Option<CommentStatus>,
}

impl CommentFilter {
    /// What the public site may see: approved comments, optionally for one post.
    pub fn approved(post_id: Option<i64>) -> Self {
        Self {
            post_id,
            status: Some(CommentStatus::Approved),
        }
    }

    pub fn matches(&self, comment: &Comment) -> bool {
        self.post_id.is_none_or(|id| comment.post_id == id)
            && self.status.is_none_or(|status| comment.status == status)
    }
}

/// Minimal reference to a comment's parent post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
}

/// A comment decorated with a summary of its post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentWithPost {
    #[serde(flatten)]
    pub comment: Comment,
    pub post: Option<PostSummary>,
}
