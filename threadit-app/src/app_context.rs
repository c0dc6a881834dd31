use crate::application::CastVote;
use crate::infrastructure::auth::GoogleOAuth;
use crate::infrastructure::db::{
    self, CommentRepository, CommunityRepository, PostRepository, UserRepository, VoteRepository,
};
use crate::infrastructure::security::RateLimiter;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub posts: PostRepository,
    pub communities: CommunityRepository,
    pub comments: CommentRepository,
    pub users: UserRepository,
    pub votes: VoteRepository,
    pub cast_vote: Arc<CastVote>,
    pub oauth: GoogleOAuth,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, oauth: GoogleOAuth) -> Self {
        Self {
            posts: PostRepository::new(db.clone()),
            communities: CommunityRepository::new(db.clone()),
            comments: CommentRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            votes: VoteRepository::new(db.clone()),
            cast_vote: Arc::new(CastVote::new(VoteRepository::new(db))),
            oauth,
            rate_limiter: RateLimiter::new(),
        }
    }

    pub async fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let client_id = std::env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID must be set");
        let client_secret =
            std::env::var("GOOGLE_CLIENT_SECRET").expect("GOOGLE_CLIENT_SECRET must be set");
        let redirect_url = std::env::var("OAUTH_REDIRECT_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000/auth/callback".to_string());

        let conn = db::create_connection(&database_url)
            .await
            .expect("Failed to connect to database");

        db::run_migrations(&conn)
            .await
            .expect("Failed to run migrations");
        tracing::info!("Database connected, migrations applied");

        let oauth = GoogleOAuth::new(&client_id, &client_secret, &redirect_url)
            .expect("Invalid Google OAuth configuration");

        Self::new(conn, oauth)
    }
}
