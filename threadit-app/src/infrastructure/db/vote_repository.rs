use super::entities::{vote, Vote};
use crate::domain::VoteRecord;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct VoteRepository {
    db: DatabaseConnection,
}

impl VoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All votes for a post, in insertion order (ascending serial id).
    ///
    /// The aggregation policy downstream is order-sensitive (first record
    /// wins for the viewer, tie-break uses the earliest vote), so the order
    /// returned here is part of the contract, not a cosmetic choice.
    pub async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<VoteRecord>, DbErr> {
        let models = Vote::find()
            .filter(vote::Column::PostId.eq(post_id))
            .order_by_asc(vote::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(to_record).collect())
    }

    /// Append one vote. Votes are never updated or deleted here; the record
    /// set for a post only grows.
    pub async fn create(
        &self,
        post_id: Uuid,
        username: &str,
        upvote: bool,
    ) -> Result<VoteRecord, DbErr> {
        let active = vote::ActiveModel {
            post_id: Set(post_id),
            username: Set(username.to_string()),
            upvote: Set(upvote),
            created_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        let model = active.insert(&self.db).await?;
        Ok(to_record(model))
    }
}

fn to_record(model: vote::Model) -> VoteRecord {
    VoteRecord {
        id: model.id,
        post_id: model.post_id,
        username: model.username,
        upvote: model.upvote,
        created_at: model.created_at,
    }
}
