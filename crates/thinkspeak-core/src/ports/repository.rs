//! Storage ports, one trait per entity plus the aggregate `BlogStore`.
//!
//! Lookups of absent ids return `Ok(None)` or an empty list. Updates of absent
//! ids fail with `RepoError::NotFound`. Deletes of absent ids are no-ops.

use async_trait::async_trait;

use crate::domain::{
    Category, CategoryChanges, Comment, CommentChanges, CommentFilter, CommentWithPost,
    NewCategory, NewComment, NewPost, NewTag, NewUser, Post, PostChanges, PostFilter,
    PostWithRelations, SiteStats, Tag, TagChanges, User,
};
use crate::error::RepoError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: i64) -> Result<Option<User>, RepoError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Fails with `Constraint` if the username is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, RepoError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, RepoError>;

    async fn find_category(&self, id: i64) -> Result<Option<Category>, RepoError>;

    async fn create_category(&self, category: NewCategory) -> Result<Category, RepoError>;

    async fn update_category(
        &self,
        id: i64,
        changes: CategoryChanges,
    ) -> Result<Category, RepoError>;

    /// Posts keep their `category_id`; it simply stops resolving.
    async fn delete_category(&self, id: i64) -> Result<(), RepoError>;
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, RepoError>;

    async fn find_tag(&self, id: i64) -> Result<Option<Tag>, RepoError>;

    async fn create_tag(&self, tag: NewTag) -> Result<Tag, RepoError>;

    async fn update_tag(&self, id: i64, changes: TagChanges) -> Result<Tag, RepoError>;

    /// Also removes every post link to the tag.
    async fn delete_tag(&self, id: i64) -> Result<(), RepoError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Matching posts, newest first, with relations resolved.
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<PostWithRelations>, RepoError>;

    async fn find_post(&self, id: i64) -> Result<Option<PostWithRelations>, RepoError>;

    async fn find_post_by_slug(&self, slug: &str)
    -> Result<Option<PostWithRelations>, RepoError>;

    /// Creates the post and its tag links together. Fails with `Constraint`
    /// if the slug is taken and `NotFound` for an absent tag, writing nothing.
    async fn create_post(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Fails with `NotFound` for an absent post or tag and `Constraint` if the
    /// new slug is taken. Fields and tag links change together or not at all.
    async fn update_post(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError>;

    /// Cascades to the post's tag links and comments.
    async fn delete_post(&self, id: i64) -> Result<(), RepoError>;

    /// Adds one view. Absent ids are ignored.
    async fn increment_view_count(&self, id: i64) -> Result<(), RepoError>;

    /// Idempotent: linking an already linked pair does nothing.
    async fn add_tag_to_post(&self, post_id: i64, tag_id: i64) -> Result<(), RepoError>;

    async fn remove_tag_from_post(&self, post_id: i64, tag_id: i64) -> Result<(), RepoError>;

    async fn post_tags(&self, post_id: i64) -> Result<Vec<Tag>, RepoError>;

    /// Replace all tag links of a post. Fails with `NotFound` for an absent post.
    async fn set_post_tags(&self, post_id: i64, tag_ids: &[i64]) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Matching comments, newest first, each with its post summary.
    async fn list_comments(
        &self,
        filter: &CommentFilter,
    ) -> Result<Vec<CommentWithPost>, RepoError>;

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, RepoError>;

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, RepoError>;

    async fn update_comment(
        &self,
        id: i64,
        changes: CommentChanges,
    ) -> Result<Comment, RepoError>;

    async fn delete_comment(&self, id: i64) -> Result<(), RepoError>;
}

/// Everything the blog needs from storage.
#[async_trait]
pub trait BlogStore:
    UserRepository + CategoryRepository + TagRepository + PostRepository + CommentRepository
{
    async fn stats(&self) -> Result<SiteStats, RepoError>;
}
