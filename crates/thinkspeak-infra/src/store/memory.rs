//! In-memory relational store - maps keyed by integer id, joins resolved by lookup.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use thinkspeak_core::domain::{
    Category, CategoryChanges, Comment, CommentChanges, CommentFilter, CommentWithPost,
    NewCategory, NewComment, NewPost, NewTag, NewUser, Post, PostChanges, PostFilter,
    PostSummary, PostTag, PostWithRelations, SiteStats, Tag, TagChanges, User, UserProfile,
};
use thinkspeak_core::error::RepoError;
use thinkspeak_core::ports::{
    BlogStore, CategoryRepository, CommentRepository, PostRepository, TagRepository,
    UserRepository,
};

/// Monotonic id generator. Ids are never handed out twice, even after deletes.
#[derive(Debug)]
struct Sequence {
    next: i64,
}

impl Default for Sequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl Sequence {
    fn next(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    categories: BTreeMap<i64, Category>,
    tags: BTreeMap<i64, Tag>,
    posts: BTreeMap<i64, Post>,
    post_tags: BTreeMap<i64, PostTag>,
    comments: BTreeMap<i64, Comment>,

    user_ids: Sequence,
    category_ids: Sequence,
    tag_ids: Sequence,
    post_ids: Sequence,
    post_tag_ids: Sequence,
    comment_ids: Sequence,
}

impl Tables {
    fn tags_of(&self, post_id: i64) -> Vec<Tag> {
        self.post_tags
            .values()
            .filter(|link| link.post_id == post_id)
            .filter_map(|link| self.tags.get(&link.tag_id).cloned())
            .collect()
    }

    fn approved_comment_count(&self, post_id: i64) -> usize {
        let filter = CommentFilter::approved(Some(post_id));
        self.comments.values().filter(|c| filter.matches(c)).count()
    }

    fn decorate(&self, post: &Post) -> PostWithRelations {
        PostWithRelations {
            post: post.clone(),
            category: post
                .category_id
                .and_then(|id| self.categories.get(&id).cloned()),
            author: post
                .author_id
                .and_then(|id| self.users.get(&id).map(UserProfile::from)),
            tags: self.tags_of(post.id),
            comment_count: self.approved_comment_count(post.id),
        }
    }

    fn ensure_slug_free(&self, slug: &str, owner: Option<i64>) -> Result<(), RepoError> {
        let taken = self
            .posts
            .values()
            .any(|p| p.slug == slug && Some(p.id) != owner);
        if taken {
            return Err(RepoError::Constraint(format!(
                "slug '{slug}' is already in use"
            )));
        }
        Ok(())
    }

    fn ensure_post(&self, id: i64) -> Result<(), RepoError> {
        if self.posts.contains_key(&id) {
            Ok(())
        } else {
            Err(RepoError::not_found("Post", id))
        }
    }

    fn ensure_tag(&self, id: i64) -> Result<(), RepoError> {
        if self.tags.contains_key(&id) {
            Ok(())
        } else {
            Err(RepoError::not_found("Tag", id))
        }
    }

    fn ensure_tags(&self, ids: &[i64]) -> Result<(), RepoError> {
        ids.iter().try_for_each(|&id| self.ensure_tag(id))
    }

    /// Replace every tag link of a post, keeping the first occurrence of duplicates.
    fn relink(&mut self, post_id: i64, tag_ids: &[i64]) {
        self.post_tags.retain(|_, link| link.post_id != post_id);
        let mut seen = HashSet::new();
        for &tag_id in tag_ids {
            if seen.insert(tag_id) {
                self.link(post_id, tag_id);
            }
        }
    }

    fn link(&mut self, post_id: i64, tag_id: i64) {
        let linked = self
            .post_tags
            .values()
            .any(|l| l.post_id == post_id && l.tag_id == tag_id);
        if !linked {
            let id = self.post_tag_ids.next();
            self.post_tags.insert(
                id,
                PostTag {
                    id,
                    post_id,
                    tag_id,
                },
            );
        }
    }
}

/// In-memory `BlogStore`.
///
/// Every operation holds the lock for its whole duration, so cascades and
/// view-count increments are atomic. Data is lost on process restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' is already taken",
                user.username
            )));
        }

        let id = tables.user_ids.next();
        let user = user.into_user(id, Utc::now());
        tables.users.insert(id, user.clone());
        tracing::debug!(user_id = id, is_admin = user.is_admin, "User created");
        Ok(user)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        let id = tables.category_ids.next();
        let category = category.into_category(id, Utc::now());
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: i64,
        changes: CategoryChanges,
    ) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        let category = tables
            .categories
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Category", id))?;
        changes.apply(category);
        Ok(category.clone())
    }

    async fn delete_category(&self, id: i64) -> Result<(), RepoError> {
        self.tables.write().await.categories.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn list_tags(&self) -> Result<Vec<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.values().cloned().collect())
    }

    async fn find_tag(&self, id: i64) -> Result<Option<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.get(&id).cloned())
    }

    async fn create_tag(&self, tag: NewTag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        let id = tables.tag_ids.next();
        let tag = tag.into_tag(id, Utc::now());
        tables.tags.insert(id, tag.clone());
        Ok(tag)
    }

    async fn update_tag(&self, id: i64, changes: TagChanges) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        let tag = tables
            .tags
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Tag", id))?;
        changes.apply(tag);
        Ok(tag.clone())
    }

    async fn delete_tag(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.tags.remove(&id).is_some() {
            tables.post_tags.retain(|_, link| link.tag_id != id);
            tracing::debug!(tag_id = id, "Tag deleted with its post links");
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<PostWithRelations>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<&Post> = tables.posts.values().filter(|p| filter.matches(p)).collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts.into_iter().map(|p| tables.decorate(p)).collect())
    }

    async fn find_post(&self, id: i64) -> Result<Option<PostWithRelations>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).map(|p| tables.decorate(p)))
    }

    async fn find_post_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<PostWithRelations>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .find(|p| p.slug == slug)
            .map(|p| tables.decorate(p)))
    }

    async fn create_post(&self, mut post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        tables.ensure_slug_free(&post.slug, None)?;
        tables.ensure_tags(&post.tag_ids)?;

        let tag_ids = std::mem::take(&mut post.tag_ids);
        let id = tables.post_ids.next();
        let post = post.into_post(id, Utc::now());
        tables.posts.insert(id, post.clone());
        tables.relink(id, &tag_ids);
        tracing::debug!(post_id = id, slug = %post.slug, status = %post.status, "Post created");
        Ok(post)
    }

    async fn update_post(&self, id: i64, mut changes: PostChanges) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        tables.ensure_post(id)?;
        if let Some(slug) = &changes.slug {
            tables.ensure_slug_free(slug, Some(id))?;
        }
        if let Some(tag_ids) = &changes.tag_ids {
            tables.ensure_tags(tag_ids)?;
        }

        let tag_ids = changes.tag_ids.take();
        let post = tables
            .posts
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Post", id))?;
        changes.apply(post, Utc::now());
        let post = post.clone();

        if let Some(tag_ids) = tag_ids {
            tables.relink(id, &tag_ids);
        }
        Ok(post)
    }

    async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.remove(&id).is_none() {
            return Ok(());
        }

        let links_before = tables.post_tags.len();
        tables.post_tags.retain(|_, link| link.post_id != id);
        let comments_before = tables.comments.len();
        tables.comments.retain(|_, comment| comment.post_id != id);

        tracing::debug!(
            post_id = id,
            tag_links = links_before - tables.post_tags.len(),
            comments = comments_before - tables.comments.len(),
            "Post deleted with cascade"
        );
        Ok(())
    }

    async fn increment_view_count(&self, id: i64) -> Result<(), RepoError> {
        if let Some(post) = self.tables.write().await.posts.get_mut(&id) {
            post.view_count = post.view_count.saturating_add(1);
        }
        Ok(())
    }

    async fn add_tag_to_post(&self, post_id: i64, tag_id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.ensure_post(post_id)?;
        tables.ensure_tag(tag_id)?;
        tables.link(post_id, tag_id);
        Ok(())
    }

    async fn remove_tag_from_post(&self, post_id: i64, tag_id: i64) -> Result<(), RepoError> {
        self.tables
            .write()
            .await
            .post_tags
            .retain(|_, link| !(link.post_id == post_id && link.tag_id == tag_id));
        Ok(())
    }

    async fn post_tags(&self, post_id: i64) -> Result<Vec<Tag>, RepoError> {
        Ok(self.tables.read().await.tags_of(post_id))
    }

    async fn set_post_tags(&self, post_id: i64, tag_ids: &[i64]) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.ensure_post(post_id)?;
        tables.ensure_tags(tag_ids)?;
        tables.relink(post_id, tag_ids);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn list_comments(
        &self,
        filter: &CommentFilter,
    ) -> Result<Vec<CommentWithPost>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<&Comment> = tables
            .comments
            .values()
            .filter(|c| filter.matches(c))
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(comments
            .into_iter()
            .map(|comment| CommentWithPost {
                comment: comment.clone(),
                post: tables.posts.get(&comment.post_id).map(|p| PostSummary {
                    id: p.id,
                    title: p.title.clone(),
                }),
            })
            .collect())
    }

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        tables.ensure_post(comment.post_id)?;

        let id = tables.comment_ids.next();
        let comment = comment.into_comment(id, Utc::now());
        tables.comments.insert(id, comment.clone());
        tracing::debug!(comment_id = id, post_id = comment.post_id, "Comment created");
        Ok(comment)
    }

    async fn update_comment(
        &self,
        id: i64,
        changes: CommentChanges,
    ) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        let comment = tables
            .comments
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Comment", id))?;
        changes.apply(comment);
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: i64) -> Result<(), RepoError> {
        self.tables.write().await.comments.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn stats(&self) -> Result<SiteStats, RepoError> {
        let tables = self.tables.read().await;
        Ok(SiteStats {
            total_posts: tables.posts.len(),
            total_comments: tables.comments.len(),
            total_views: tables.posts.values().map(|p| p.view_count).sum(),
            total_categories: tables.categories.len(),
        })
    }
}
