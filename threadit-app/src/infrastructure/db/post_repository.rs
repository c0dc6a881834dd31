use super::entities::{comment, community, post, user, Comment, Community, Post, User};
use crate::domain::PostWithDetails;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostRepository {
    db: DatabaseConnection,
}

impl PostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, post_data: &crate::domain::Post) -> Result<post::Model, DbErr> {
        let active = post::ActiveModel {
            id: Set(post_data.id),
            title: Set(post_data.title.clone()),
            body: Set(post_data.body.clone()),
            image: Set(post_data.image.clone()),
            username: Set(post_data.username.clone()),
            community_id: Set(post_data.community_id),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<post::Model>, DbErr> {
        Post::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_id_with_details(
        &self,
        id: Uuid,
    ) -> Result<Option<PostWithDetails>, DbErr> {
        match self.find_by_id(id).await? {
            Some(model) => Ok(Some(self.with_details(model).await?)),
            None => Ok(None),
        }
    }

    pub async fn list_recent(&self, limit: u64) -> Result<Vec<PostWithDetails>, DbErr> {
        let models: Vec<post::Model> = Post::find()
            .order_by_desc(post::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        let mut results = Vec::new();
        for model in models {
            results.push(self.with_details(model).await?);
        }
        Ok(results)
    }

    pub async fn list_by_topic(
        &self,
        topic: &str,
        limit: u64,
    ) -> Result<Vec<PostWithDetails>, DbErr> {
        let community = Community::find()
            .filter(community::Column::Topic.eq(topic))
            .one(&self.db)
            .await?;

        let Some(community) = community else {
            return Ok(Vec::new());
        };

        let models: Vec<post::Model> = Post::find()
            .filter(post::Column::CommunityId.eq(community.id))
            .order_by_desc(post::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        let mut results = Vec::new();
        for model in models {
            results.push(self.with_details(model).await?);
        }
        Ok(results)
    }

    async fn with_details(&self, model: post::Model) -> Result<PostWithDetails, DbErr> {
        let community_topic = Community::find_by_id(model.community_id)
            .one(&self.db)
            .await?
            .map(|c| c.topic)
            .unwrap_or_default();

        let author_avatar = User::find()
            .filter(user::Column::Username.eq(model.username.clone()))
            .one(&self.db)
            .await?
            .and_then(|u| u.avatar_url);

        let comment_count = Comment::find()
            .filter(comment::Column::PostId.eq(model.id))
            .count(&self.db)
            .await?;

        Ok(PostWithDetails {
            id: model.id,
            title: model.title,
            body: model.body,
            image: model.image,
            username: model.username,
            community_topic,
            author_avatar,
            comment_count,
            created_at: model.created_at,
        })
    }
}
