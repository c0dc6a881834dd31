use crate::domain::{VoteAction, VoteDirection, VoteRecord, ViewerVote, VoteSet};
use crate::infrastructure::db::VoteRepository;
use serde::{Deserialize, Serialize};
use threadit_errors::AppError;
use uuid::Uuid;

/// What a vote click produced, derived from the record set that was current
/// after the operation finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub submitted: bool,
    pub records: Vec<VoteRecord>,
    pub viewer_vote: ViewerVote,
    pub net_score: i32,
}

pub struct CastVote {
    votes: VoteRepository,
}

impl CastVote {
    pub fn new(votes: VoteRepository) -> Self {
        Self { votes }
    }

    /// Server-side run of the vote toggle: load the current record set,
    /// derive the viewer's state, decide, and only then write.
    ///
    /// A submission is always followed by a fresh read, and the returned
    /// outcome is derived from that follow-up delivery. Nothing here updates
    /// vote state speculatively; a NoOp returns the unchanged derivation.
    pub async fn execute(
        &self,
        post_id: Uuid,
        viewer: Option<&str>,
        direction: VoteDirection,
    ) -> Result<VoteOutcome, AppError> {
        let records = self
            .votes
            .list_by_post(post_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let set = VoteSet::new(records);
        let current = set.viewer_vote(viewer);

        match current.decide(direction, viewer.is_some()) {
            VoteAction::Reject => Err(AppError::Unauthenticated),
            VoteAction::NoOp => Ok(outcome(set, viewer, false)),
            VoteAction::Submit(requested) => {
                let Some(username) = viewer else {
                    return Err(AppError::Unauthenticated);
                };

                self.votes
                    .create(post_id, username, requested.is_upvote())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;

                tracing::info!(
                    %post_id,
                    username,
                    upvote = requested.is_upvote(),
                    "vote recorded"
                );

                let refreshed = self
                    .votes
                    .list_by_post(post_id)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;

                Ok(outcome(VoteSet::new(refreshed), viewer, true))
            }
        }
    }
}

fn outcome(set: VoteSet, viewer: Option<&str>, submitted: bool) -> VoteOutcome {
    VoteOutcome {
        submitted,
        viewer_vote: set.viewer_vote(viewer),
        net_score: set.net_score(),
        records: set.into_records(),
    }
}
