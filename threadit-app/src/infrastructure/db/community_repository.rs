use super::entities::{community, Community};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};

#[derive(Clone)]
pub struct CommunityRepository {
    db: DatabaseConnection,
}

impl CommunityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_topic(&self, topic: &str) -> Result<Option<community::Model>, DbErr> {
        Community::find()
            .filter(community::Column::Topic.eq(topic))
            .one(&self.db)
            .await
    }

    pub async fn find_or_create(&self, topic: &str) -> Result<community::Model, DbErr> {
        if let Some(existing) = self.find_by_topic(topic).await? {
            return Ok(existing);
        }

        let active = community::ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            topic: Set(topic.to_string()),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await
    }

    pub async fn list(&self, limit: u64) -> Result<Vec<community::Model>, DbErr> {
        Community::find()
            .order_by_desc(community::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
    }
}
