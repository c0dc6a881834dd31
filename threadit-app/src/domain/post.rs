use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: uuid::Uuid,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub username: String,
    pub community_id: uuid::Uuid,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Post {
    pub fn new(
        title: String,
        body: String,
        image: Option<String>,
        username: String,
        community_id: uuid::Uuid,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            title,
            body,
            image,
            username,
            community_id,
            created_at: None,
        }
    }
}

/// Post with the extra display info the feed needs (community topic, comment
/// count, author avatar). The score is NOT here: it is derived client-side
/// from the post's vote records on every render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithDetails {
    pub id: uuid::Uuid,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub username: String,
    pub community_topic: String,
    pub author_avatar: Option<String>,
    pub comment_count: u64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
