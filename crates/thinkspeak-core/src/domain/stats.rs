use serde::Serialize;

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub total_posts: usize,
    /// Comments in every moderation state.
    pub total_comments: usize,
    pub total_views: u64,
    pub total_categories: usize,
}
