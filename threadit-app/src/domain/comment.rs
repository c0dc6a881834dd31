use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: uuid::Uuid,
    pub username: String,
    pub text: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
