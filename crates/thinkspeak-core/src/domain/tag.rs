use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag entity - linked to posts many-to-many.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
}

impl NewTag {
    pub fn into_tag(self, id: i64, now: DateTime<Utc>) -> Tag {
        Tag {
            id,
            name: self.name,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TagChanges {
    pub name: Option<String>,
}

impl TagChanges {
    pub fn apply(self, tag: &mut Tag) {
        if let Some(name) = self.name {
            tag.name = name;
        }
    }
}
