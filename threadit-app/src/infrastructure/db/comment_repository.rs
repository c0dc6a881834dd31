use super::entities::{comment, Comment};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentRepository {
    db: DatabaseConnection,
}

impl CommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        post_id: Uuid,
        username: &str,
        text: &str,
    ) -> Result<crate::domain::Comment, DbErr> {
        let active = comment::ActiveModel {
            post_id: Set(post_id),
            username: Set(username.to_string()),
            text: Set(text.to_string()),
            created_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        let model = active.insert(&self.db).await?;
        Ok(to_comment(model))
    }

    pub async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<crate::domain::Comment>, DbErr> {
        let models = Comment::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(to_comment).collect())
    }
}

fn to_comment(model: comment::Model) -> crate::domain::Comment {
    crate::domain::Comment {
        id: model.id,
        post_id: model.post_id,
        username: model.username,
        text: model.text,
        created_at: model.created_at,
    }
}
