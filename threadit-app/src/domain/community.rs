use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    pub id: uuid::Uuid,
    pub topic: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Community {
    pub fn new(topic: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            topic,
            created_at: None,
        }
    }
}
