//! Startup data: the admin account plus sample categories and tags.

use thinkspeak_core::domain::{NewCategory, NewTag, NewUser};
use thinkspeak_core::error::RepoError;
use thinkspeak_core::ports::BlogStore;

const SAMPLE_CATEGORIES: &[(&str, &str)] = &[
    ("Development", "Web development and programming"),
    ("AI & ML", "Artificial Intelligence and Machine Learning"),
    ("Cloud", "Cloud computing and infrastructure"),
    ("Design", "UI/UX and design principles"),
    ("DevOps", "DevOps and deployment strategies"),
];

const SAMPLE_TAGS: &[&str] = &[
    "React",
    "TypeScript",
    "Node.js",
    "AWS",
    "Docker",
    "MongoDB",
    "GraphQL",
    "Python",
];

/// What to load into a fresh store.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub admin: NewUser,
    pub sample_data: bool,
}

/// Load the admin account and, optionally, the sample reference data.
///
/// Works through the `BlogStore` port, so id counters continue above the
/// seeded rows.
pub async fn seed(store: &dyn BlogStore, options: SeedOptions) -> Result<(), RepoError> {
    let admin = store.create_user(options.admin).await?;
    tracing::info!(user_id = admin.id, username = %admin.username, "Admin account ready");

    if !options.sample_data {
        return Ok(());
    }

    for (name, description) in SAMPLE_CATEGORIES {
        store
            .create_category(NewCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
            })
            .await?;
    }
    for name in SAMPLE_TAGS {
        store
            .create_tag(NewTag {
                name: name.to_string(),
            })
            .await?;
    }

    tracing::info!(
        categories = SAMPLE_CATEGORIES.len(),
        tags = SAMPLE_TAGS.len(),
        "Sample data loaded"
    );
    Ok(())
}
