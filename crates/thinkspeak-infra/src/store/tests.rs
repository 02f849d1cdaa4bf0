use thinkspeak_core::domain::{
    CategoryChanges, CommentChanges, CommentFilter, CommentStatus, NewCategory, NewComment,
    NewPost, NewTag, NewUser, PostChanges, PostFilter, PostStatus,
};
use thinkspeak_core::error::RepoError;
use thinkspeak_core::ports::{
    BlogStore, CategoryRepository, CommentRepository, PostRepository, TagRepository,
    UserRepository,
};

use super::{MemoryStore, SeedOptions, seed};

fn admin() -> NewUser {
    NewUser {
        username: "admin".to_string(),
        email: "admin@thinkspeak.com".to_string(),
        password_hash: "not-a-real-hash".to_string(),
        is_admin: true,
    }
}

fn new_post(slug: &str, status: PostStatus) -> NewPost {
    NewPost {
        title: format!("Title of {slug}"),
        slug: slug.to_string(),
        content: "Body".to_string(),
        excerpt: Some("Short".to_string()),
        featured_image: None,
        category_id: None,
        author_id: Some(1),
        status,
        featured: false,
        tag_ids: Vec::new(),
    }
}

fn new_comment(post_id: i64) -> NewComment {
    NewComment {
        post_id,
        name: "A".to_string(),
        email: "a@x.com".to_string(),
        content: "hi".to_string(),
        status: CommentStatus::Pending,
    }
}

async fn seeded() -> MemoryStore {
    let store = MemoryStore::new();
    seed(
        &store,
        SeedOptions {
            admin: admin(),
            sample_data: true,
        },
    )
    .await
    .unwrap();
    store
}

#[tokio::test]
async fn test_seed_loads_admin_and_reference_data() {
    let store = seeded().await;

    let admin = store.find_user_by_username("admin").await.unwrap().unwrap();
    assert_eq!(admin.id, 1);
    assert!(admin.is_admin);
    assert_eq!(store.list_categories().await.unwrap().len(), 5);
    assert_eq!(store.list_tags().await.unwrap().len(), 8);

    // Counters continue above the seeded rows.
    let category = store
        .create_category(NewCategory {
            name: "Security".to_string(),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(category.id, 6);
}

#[tokio::test]
async fn test_get_after_create_returns_same_fields() {
    let store = MemoryStore::new();

    let created = store
        .create_post(new_post("first", PostStatus::Draft))
        .await
        .unwrap();
    let fetched = store.find_post(created.id).await.unwrap().unwrap();

    assert_eq!(fetched.post, created);
    assert_eq!(fetched.post.view_count, 0);
    assert!(fetched.tags.is_empty());
    assert_eq!(fetched.comment_count, 0);

    let tag = store
        .create_tag(NewTag {
            name: "Rust".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(store.find_tag(tag.id).await.unwrap(), Some(tag));
}

#[tokio::test]
async fn test_duplicate_usernames_and_slugs_are_rejected() {
    let store = seeded().await;
    assert!(matches!(
        store.create_user(admin()).await,
        Err(RepoError::Constraint(_))
    ));

    store
        .create_post(new_post("taken", PostStatus::Draft))
        .await
        .unwrap();
    let other = store
        .create_post(new_post("other", PostStatus::Draft))
        .await
        .unwrap();

    assert!(matches!(
        store.create_post(new_post("taken", PostStatus::Draft)).await,
        Err(RepoError::Constraint(_))
    ));
    let rename = PostChanges {
        slug: Some("taken".to_string()),
        ..PostChanges::default()
    };
    assert!(matches!(
        store.update_post(other.id, rename).await,
        Err(RepoError::Constraint(_))
    ));

    // Keeping its own slug is fine.
    let keep = PostChanges {
        slug: Some("other".to_string()),
        ..PostChanges::default()
    };
    assert!(store.update_post(other.id, keep).await.is_ok());
}

#[tokio::test]
async fn test_update_missing_ids_fail_not_found() {
    let store = MemoryStore::new();

    assert_eq!(
        store
            .update_category(42, CategoryChanges::default())
            .await
            .unwrap_err(),
        RepoError::not_found("Category", 42)
    );
    assert_eq!(
        store
            .update_post(42, PostChanges::default())
            .await
            .unwrap_err(),
        RepoError::not_found("Post", 42)
    );
    assert_eq!(
        store
            .update_comment(42, CommentChanges::default())
            .await
            .unwrap_err(),
        RepoError::not_found("Comment", 42)
    );

    // Reads and deletes of absent ids are not failures.
    assert!(store.find_post(42).await.unwrap().is_none());
    assert!(store.delete_post(42).await.is_ok());
    assert!(store.delete_tag(42).await.is_ok());
    assert!(store.increment_view_count(42).await.is_ok());
}

#[tokio::test]
async fn test_list_posts_filters_sorts_and_decorates() {
    let store = seeded().await;

    let mut draft = new_post("draft", PostStatus::Draft);
    draft.category_id = Some(1);
    store.create_post(draft).await.unwrap();

    let mut older = new_post("older", PostStatus::Published);
    older.category_id = Some(1);
    older.featured = true;
    let older = store.create_post(older).await.unwrap();

    let mut newer = new_post("newer", PostStatus::Published);
    newer.category_id = Some(2);
    let newer = store.create_post(newer).await.unwrap();

    let published = store.list_posts(&PostFilter::published()).await.unwrap();
    let ids: Vec<i64> = published.iter().map(|p| p.post.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    let featured_in_dev = store
        .list_posts(&PostFilter {
            category_id: Some(1),
            featured: Some(true),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(featured_in_dev.len(), 1);
    let decorated = &featured_in_dev[0];
    assert_eq!(decorated.post.id, older.id);
    assert_eq!(decorated.category.as_ref().unwrap().name, "Development");
    assert_eq!(decorated.author.as_ref().unwrap().username, "admin");

    assert_eq!(store.list_posts(&PostFilter::default()).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_comment_count_only_counts_approved() {
    let store = MemoryStore::new();
    let post = store
        .create_post(new_post("counted", PostStatus::Published))
        .await
        .unwrap();

    let pending = store.create_comment(new_comment(post.id)).await.unwrap();
    let approved = store.create_comment(new_comment(post.id)).await.unwrap();
    store
        .update_comment(
            approved.id,
            CommentChanges {
                status: Some(CommentStatus::Approved),
                ..CommentChanges::default()
            },
        )
        .await
        .unwrap();

    let decorated = store.find_post(post.id).await.unwrap().unwrap();
    assert_eq!(decorated.comment_count, 1);

    let public = store
        .list_comments(&CommentFilter::approved(Some(post.id)))
        .await
        .unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].comment.id, approved.id);
    assert_eq!(public[0].post.as_ref().unwrap().title, post.title);

    let everything = store
        .list_comments(&CommentFilter::default())
        .await
        .unwrap();
    let ids: Vec<i64> = everything.iter().map(|c| c.comment.id).collect();
    assert_eq!(ids, vec![approved.id, pending.id]);
}

#[tokio::test]
async fn test_comment_requires_existing_post() {
    let store = MemoryStore::new();
    assert_eq!(
        store.create_comment(new_comment(9)).await.unwrap_err(),
        RepoError::not_found("Post", 9)
    );
}

#[tokio::test]
async fn test_delete_post_cascades() {
    let store = seeded().await;
    let doomed = store
        .create_post(new_post("doomed", PostStatus::Published))
        .await
        .unwrap();
    let survivor = store
        .create_post(new_post("survivor", PostStatus::Published))
        .await
        .unwrap();

    store.set_post_tags(doomed.id, &[1, 2]).await.unwrap();
    store.set_post_tags(survivor.id, &[2]).await.unwrap();
    store.create_comment(new_comment(doomed.id)).await.unwrap();
    let kept = store.create_comment(new_comment(survivor.id)).await.unwrap();

    store.delete_post(doomed.id).await.unwrap();

    assert!(store.find_post(doomed.id).await.unwrap().is_none());
    assert!(store.post_tags(doomed.id).await.unwrap().is_empty());
    let listed: Vec<i64> = store
        .list_posts(&PostFilter::default())
        .await
        .unwrap()
        .iter()
        .map(|p| p.post.id)
        .collect();
    assert_eq!(listed, vec![survivor.id]);

    let remaining = store
        .list_comments(&CommentFilter::default())
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].comment.id, kept.id);
    assert_eq!(store.post_tags(survivor.id).await.unwrap().len(), 1);

    // Ids are never reused.
    let next = store
        .create_post(new_post("next", PostStatus::Draft))
        .await
        .unwrap();
    assert!(next.id > survivor.id);
}

#[tokio::test]
async fn test_increment_view_count_adds_exactly_one() {
    let store = MemoryStore::new();
    let post = store
        .create_post(new_post("viewed", PostStatus::Published))
        .await
        .unwrap();

    for expected in 1..=3 {
        store.increment_view_count(post.id).await.unwrap();
        let current = store.find_post(post.id).await.unwrap().unwrap();
        assert_eq!(current.post.view_count, expected);
    }

    assert_eq!(store.stats().await.unwrap().total_views, 3);
}

#[tokio::test]
async fn test_post_tag_links() {
    let store = seeded().await;
    let post = store
        .create_post(new_post("tagged", PostStatus::Draft))
        .await
        .unwrap();

    store.add_tag_to_post(post.id, 1).await.unwrap();
    store.add_tag_to_post(post.id, 1).await.unwrap();
    store.add_tag_to_post(post.id, 3).await.unwrap();
    let names: Vec<String> = store
        .post_tags(post.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["React", "Node.js"]);

    store.remove_tag_from_post(post.id, 1).await.unwrap();
    assert_eq!(store.post_tags(post.id).await.unwrap().len(), 1);

    store.set_post_tags(post.id, &[4, 5, 4]).await.unwrap();
    assert_eq!(store.post_tags(post.id).await.unwrap().len(), 2);

    assert_eq!(
        store.set_post_tags(post.id, &[99]).await.unwrap_err(),
        RepoError::not_found("Tag", 99)
    );
    assert_eq!(
        store.add_tag_to_post(999, 1).await.unwrap_err(),
        RepoError::not_found("Post", 999)
    );

    // Deleting a tag drops its links.
    store.delete_tag(4).await.unwrap();
    let remaining = store.find_post(post.id).await.unwrap().unwrap();
    assert_eq!(remaining.tags.len(), 1);
    assert_eq!(remaining.tags[0].name, "Docker");
}

#[tokio::test]
async fn test_post_writes_link_tags_all_or_nothing() {
    let store = seeded().await;

    let mut tagged = new_post("linked", PostStatus::Draft);
    tagged.tag_ids = vec![2, 1, 2];
    let post = store.create_post(tagged).await.unwrap();
    let names: Vec<String> = store
        .post_tags(post.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["TypeScript", "React"]);

    let mut dangling = new_post("dangling", PostStatus::Draft);
    dangling.tag_ids = vec![1, 99];
    assert_eq!(
        store.create_post(dangling).await.unwrap_err(),
        RepoError::not_found("Tag", 99)
    );
    assert!(store.find_post_by_slug("dangling").await.unwrap().is_none());

    let changes = PostChanges {
        title: Some("Renamed".to_string()),
        tag_ids: Some(vec![3, 99]),
        ..PostChanges::default()
    };
    assert_eq!(
        store.update_post(post.id, changes).await.unwrap_err(),
        RepoError::not_found("Tag", 99)
    );
    let unchanged = store.find_post(post.id).await.unwrap().unwrap();
    assert_eq!(unchanged.post.title, post.title);
    assert_eq!(unchanged.post.updated_at, post.updated_at);
    assert_eq!(unchanged.tags.len(), 2);

    let changes = PostChanges {
        title: Some("Renamed".to_string()),
        tag_ids: Some(vec![3]),
        ..PostChanges::default()
    };
    store.update_post(post.id, changes).await.unwrap();
    let updated = store.find_post(post.id).await.unwrap().unwrap();
    assert_eq!(updated.post.title, "Renamed");
    assert_eq!(updated.tags.len(), 1);
    assert_eq!(updated.tags[0].name, "Node.js");
}

#[tokio::test]
async fn test_find_comment_by_id() {
    let store = seeded().await;
    let post = store
        .create_post(new_post("discussed", PostStatus::Published))
        .await
        .unwrap();
    let comment = store.create_comment(new_comment(post.id)).await.unwrap();

    let found = store.find_comment(comment.id).await.unwrap().unwrap();
    assert_eq!(found, comment);
    assert!(store.find_comment(comment.id + 1).await.unwrap().is_none());

    store.delete_comment(comment.id).await.unwrap();
    assert!(store.find_comment(comment.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_deleted_category_stops_resolving() {
    let store = seeded().await;
    let mut post = new_post("filed", PostStatus::Published);
    post.category_id = Some(3);
    let post = store.create_post(post).await.unwrap();

    store.delete_category(3).await.unwrap();

    let decorated = store.find_post_by_slug("filed").await.unwrap().unwrap();
    assert_eq!(decorated.post.id, post.id);
    assert_eq!(decorated.post.category_id, Some(3));
    assert!(decorated.category.is_none());
}

#[tokio::test]
async fn test_stats_totals() {
    let store = seeded().await;
    let post = store
        .create_post(new_post("stats", PostStatus::Published))
        .await
        .unwrap();
    store.create_comment(new_comment(post.id)).await.unwrap();
    store.increment_view_count(post.id).await.unwrap();
    store.increment_view_count(post.id).await.unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_posts, 1);
    assert_eq!(stats.total_comments, 1);
    assert_eq!(stats.total_views, 2);
    assert_eq!(stats.total_categories, 5);
}
