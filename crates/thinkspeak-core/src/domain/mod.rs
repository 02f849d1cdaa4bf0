//! Domain entities - the core business objects and their joined read views.

mod category;
mod comment;
mod post;
mod slug;
mod stats;
mod tag;
mod user;

pub use category::{Category, CategoryChanges, NewCategory};
pub use comment::{
    Comment, CommentChanges, CommentFilter, CommentStatus, CommentWithPost, NewComment,
    PostSummary,
};
pub use post::{NewPost, Post, PostChanges, PostFilter, PostStatus, PostTag, PostWithRelations};
pub use slug::{is_valid_slug, resolve_slug, slugify};
pub use stats::SiteStats;
pub use tag::{NewTag, Tag, TagChanges};
pub use user::{NewUser, User, UserProfile};
