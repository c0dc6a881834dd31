use serde::{Deserialize, Serialize};

/// One user's directional vote on one post, as delivered by the fetch layer.
/// Records are immutable; the collection for a post is append-only upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub id: i64,
    pub post_id: uuid::Uuid,
    pub username: String,
    pub upvote: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// The direction a viewer clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn is_upvote(self) -> bool {
        matches!(self, VoteDirection::Up)
    }
}

/// The viewer's own vote on a post. Explicit tri-state so "no vote yet" is
/// never conflated with "downvote".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewerVote {
    #[default]
    NoVote,
    Up,
    Down,
}

/// What a vote click should do, decided from the current viewer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    /// Viewer is not logged in. Surface one notice, change nothing.
    Reject,
    /// Clicking the already-active arrow. There is no "remove vote".
    NoOp,
    Submit(VoteDirection),
}

impl ViewerVote {
    /// Decide how to handle a click on `requested` given the current state.
    ///
    /// Stateless: callers pass the latest derived `ViewerVote` snapshot and
    /// act on the returned action. Clicking the same direction twice is a
    /// no-op rather than a retraction.
    pub fn decide(self, requested: VoteDirection, authenticated: bool) -> VoteAction {
        if !authenticated {
            return VoteAction::Reject;
        }
        match (self, requested) {
            (ViewerVote::Up, VoteDirection::Up) | (ViewerVote::Down, VoteDirection::Down) => {
                VoteAction::NoOp
            }
            _ => VoteAction::Submit(requested),
        }
    }
}

impl From<VoteDirection> for ViewerVote {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => ViewerVote::Up,
            VoteDirection::Down => ViewerVote::Down,
        }
    }
}

/// The votes for a single post, in the order the fetch layer returned them.
///
/// Replaced wholesale on every delivery; both derivations below are pure and
/// recomputed from scratch each time, so there is no state to patch or merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteSet {
    records: Vec<VoteRecord>,
}

impl VoteSet {
    pub fn new(records: Vec<VoteRecord>) -> Self {
        Self { records }
    }

    /// Swap in a freshly fetched record set. A new delivery fully supersedes
    /// the previous one.
    pub fn replace(&mut self, records: Vec<VoteRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[VoteRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<VoteRecord> {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Net displayed score: +1 per upvote, -1 per downvote, reduced left to
    /// right. An empty set scores 0. A non-empty set that reduces to exactly
    /// 0 falls back to the direction of the earliest record, so a fresh vote
    /// that gets exactly offset still shows a signal from the first voter.
    pub fn net_score(&self) -> i32 {
        if self.records.is_empty() {
            return 0;
        }

        let total = self
            .records
            .iter()
            .fold(0i32, |acc, v| if v.upvote { acc + 1 } else { acc - 1 });

        if total == 0 {
            // Tie-break on the first record in received order.
            if self.records[0].upvote {
                1
            } else {
                -1
            }
        } else {
            total
        }
    }

    /// The viewer's own vote, derived from the record set.
    ///
    /// Scans in received order and takes the first record whose username
    /// matches; later records for the same username are ignored. The fetch
    /// layer realistically returns at most one record per user, but nothing
    /// here assumes it, so resolution stays order-sensitive on purpose.
    pub fn viewer_vote(&self, viewer: Option<&str>) -> ViewerVote {
        let Some(viewer) = viewer else {
            return ViewerVote::NoVote;
        };

        match self.records.iter().find(|v| v.username == viewer) {
            Some(v) if v.upvote => ViewerVote::Up,
            Some(_) => ViewerVote::Down,
            None => ViewerVote::NoVote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(username: &str, upvote: bool) -> VoteRecord {
        VoteRecord {
            id: 0,
            post_id: uuid::Uuid::nil(),
            username: username.to_string(),
            upvote,
            created_at: None,
        }
    }

    #[test]
    fn empty_set_scores_zero() {
        assert_eq!(VoteSet::default().net_score(), 0);
    }

    #[test]
    fn single_vote_scores_its_direction() {
        assert_eq!(VoteSet::new(vec![record("a", true)]).net_score(), 1);
        assert_eq!(VoteSet::new(vec![record("a", false)]).net_score(), -1);
    }

    #[test]
    fn unbalanced_set_scores_the_sum() {
        let set = VoteSet::new(vec![
            record("a", true),
            record("b", true),
            record("c", false),
        ]);
        assert_eq!(set.net_score(), 1);

        let set = VoteSet::new(vec![
            record("a", false),
            record("b", false),
            record("c", true),
        ]);
        assert_eq!(set.net_score(), -1);
    }

    #[test]
    fn balanced_set_tie_breaks_on_first_record() {
        let set = VoteSet::new(vec![record("a", true), record("b", false)]);
        assert_eq!(set.net_score(), 1);

        let set = VoteSet::new(vec![record("a", false), record("b", true)]);
        assert_eq!(set.net_score(), -1);

        let set = VoteSet::new(vec![
            record("a", false),
            record("b", true),
            record("c", true),
            record("d", false),
        ]);
        assert_eq!(set.net_score(), -1);
    }

    #[test]
    fn viewer_without_session_has_no_vote() {
        let set = VoteSet::new(vec![record("a", true)]);
        assert_eq!(set.viewer_vote(None), ViewerVote::NoVote);
    }

    #[test]
    fn viewer_without_record_has_no_vote() {
        let set = VoteSet::new(vec![record("a", true), record("b", false)]);
        assert_eq!(set.viewer_vote(Some("c")), ViewerVote::NoVote);
    }

    #[test]
    fn viewer_vote_maps_upvote_flag() {
        let set = VoteSet::new(vec![record("a", true), record("b", false)]);
        assert_eq!(set.viewer_vote(Some("a")), ViewerVote::Up);
        assert_eq!(set.viewer_vote(Some("b")), ViewerVote::Down);
    }

    #[test]
    fn duplicate_viewer_records_resolve_to_the_first() {
        let set = VoteSet::new(vec![
            record("a", false),
            record("a", true),
            record("a", true),
        ]);
        assert_eq!(set.viewer_vote(Some("a")), ViewerVote::Down);
    }

    #[test]
    fn replace_supersedes_previous_delivery() {
        let mut set = VoteSet::new(vec![record("a", true)]);
        set.replace(vec![record("b", false), record("c", false)]);
        assert_eq!(set.net_score(), -2);
        assert_eq!(set.viewer_vote(Some("a")), ViewerVote::NoVote);
    }

    #[test]
    fn same_direction_click_is_a_noop() {
        assert_eq!(
            ViewerVote::Up.decide(VoteDirection::Up, true),
            VoteAction::NoOp
        );
        assert_eq!(
            ViewerVote::Down.decide(VoteDirection::Down, true),
            VoteAction::NoOp
        );
    }

    #[test]
    fn opposite_direction_click_submits_the_toggle() {
        assert_eq!(
            ViewerVote::Up.decide(VoteDirection::Down, true),
            VoteAction::Submit(VoteDirection::Down)
        );
        assert_eq!(
            ViewerVote::Down.decide(VoteDirection::Up, true),
            VoteAction::Submit(VoteDirection::Up)
        );
    }

    #[test]
    fn first_vote_submits() {
        assert_eq!(
            ViewerVote::NoVote.decide(VoteDirection::Up, true),
            VoteAction::Submit(VoteDirection::Up)
        );
        assert_eq!(
            ViewerVote::NoVote.decide(VoteDirection::Down, true),
            VoteAction::Submit(VoteDirection::Down)
        );
    }

    #[test]
    fn unauthenticated_click_is_rejected_regardless_of_state() {
        for state in [ViewerVote::NoVote, ViewerVote::Up, ViewerVote::Down] {
            for requested in [VoteDirection::Up, VoteDirection::Down] {
                assert_eq!(state.decide(requested, false), VoteAction::Reject);
            }
        }
    }

    #[test]
    fn scenario_viewer_upvoted_then_offset() {
        let set = VoteSet::new(vec![record("a", true), record("b", false)]);
        assert_eq!(set.net_score(), 1);
        assert_eq!(set.viewer_vote(Some("a")), ViewerVote::Up);
    }

    #[test]
    fn scenario_onlooker_sees_tie_broken_downvote() {
        let set = VoteSet::new(vec![record("a", false), record("b", true)]);
        assert_eq!(set.net_score(), -1);
        assert_eq!(set.viewer_vote(Some("c")), ViewerVote::NoVote);
    }

    #[test]
    fn scenario_empty_post_for_anonymous_viewer() {
        let set = VoteSet::default();
        assert_eq!(set.net_score(), 0);
        assert_eq!(set.viewer_vote(None), ViewerVote::NoVote);
        assert_eq!(
            set.viewer_vote(None).decide(VoteDirection::Up, false),
            VoteAction::Reject
        );
        assert_eq!(
            set.viewer_vote(None).decide(VoteDirection::Down, false),
            VoteAction::Reject
        );
    }
}
