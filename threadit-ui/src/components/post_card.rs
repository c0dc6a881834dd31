use leptos::prelude::*;
use leptos::task::spawn_local;
use server_fn::ServerFnError;
use threadit_app::domain::{
    PostWithDetails, ViewerVote, VoteAction, VoteDirection, VoteRecord, VoteSet,
};
use uuid::Uuid;

use super::Avatar;

#[server(GetVotesFn, "/api", endpoint = "votes_by_post")]
pub async fn get_votes_by_post(post_id: Uuid) -> Result<Vec<VoteRecord>, ServerFnError> {
    use threadit_app::AppContext;

    let ctx = expect_context::<AppContext>();

    ctx.votes
        .list_by_post(post_id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Records the vote decided client-side. The server re-runs the same toggle
/// decision against its own current record set, so a stale client can only
/// ever produce a no-op, never a duplicate direction.
#[server(AddVoteFn, "/api", endpoint = "add_vote")]
pub async fn add_vote(post_id: Uuid, upvote: bool) -> Result<bool, ServerFnError> {
    use threadit_app::infrastructure::security::WriteKey;
    use threadit_app::AppContext;

    let ctx = expect_context::<AppContext>();

    let viewer = crate::session_username().await;
    let key = WriteKey::for_request(viewer.as_deref(), crate::peer_ip());
    if let Err(e) = ctx.rate_limiter.check_write(key) {
        return Err(ServerFnError::new(e.user_message()));
    }

    let direction = if upvote {
        VoteDirection::Up
    } else {
        VoteDirection::Down
    };

    let outcome = ctx
        .cast_vote
        .execute(post_id, viewer.as_deref(), direction)
        .await
        .map_err(|e| ServerFnError::new(e.user_message()))?;

    Ok(outcome.submitted)
}

#[component]
pub fn PostCard(post: PostWithDetails, #[prop(into)] viewer: Signal<Option<String>>) -> impl IntoView {
    let post_id = post.id;

    let votes = Resource::new(move || post_id, get_votes_by_post);
    let viewer_vote = RwSignal::new(ViewerVote::NoVote);
    let notice = RwSignal::new(Option::<String>::None);

    // Re-derive the viewer's vote from every fresh record set: first load,
    // viewer change, and the refetch after a submitted vote. The submit path
    // below never touches `viewer_vote` directly.
    Effect::new(move |_| {
        let records = votes.get().and_then(|r| r.ok()).unwrap_or_default();
        viewer_vote.set(VoteSet::new(records).viewer_vote(viewer.get().as_deref()));
    });

    let net_score = move || {
        let records = votes.get().and_then(|r| r.ok()).unwrap_or_default();
        VoteSet::new(records).net_score()
    };

    let on_vote = move |direction: VoteDirection| {
        let authenticated = viewer.get_untracked().is_some();
        match viewer_vote.get_untracked().decide(direction, authenticated) {
            VoteAction::Reject => {
                notice.set(Some("Kamu harus login dulu untuk vote!".to_string()));
            }
            VoteAction::NoOp => {}
            VoteAction::Submit(requested) => {
                spawn_local(async move {
                    match add_vote(post_id, requested.is_upvote()).await {
                        // The displayed state only changes through the refetch.
                        Ok(_) => votes.refetch(),
                        Err(e) => tracing::warn!("add_vote gagal: {}", e),
                    }
                });
            }
        }
    };

    let posted_at = post
        .created_at
        .map(|t| t.format("%d %b %Y %H:%M").to_string())
        .unwrap_or_default();

    view! {
        <div class="post-card">
            <div class="post-card__votes">
                <button
                    class=move || {
                        if viewer_vote.get() == ViewerVote::Up {
                            "post-card__arrow post-card__arrow--active-up"
                        } else {
                            "post-card__arrow"
                        }
                    }
                    on:click=move |_| on_vote(VoteDirection::Up)
                >
                    "▲"
                </button>
                <p class="post-card__score">{net_score}</p>
                <button
                    class=move || {
                        if viewer_vote.get() == ViewerVote::Down {
                            "post-card__arrow post-card__arrow--active-down"
                        } else {
                            "post-card__arrow"
                        }
                    }
                    on:click=move |_| on_vote(VoteDirection::Down)
                >
                    "▼"
                </button>
            </div>

            <div class="post-card__main">
                <div class="post-card__header">
                    <Avatar seed=post.community_topic.clone()/>
                    <p class="post-card__meta">
                        <a href=format!("/c/{}", post.community_topic) class="post-card__community">
                            "c/" {post.community_topic.clone()}
                        </a>
                        " • oleh u/" {post.username.clone()} " • " {posted_at}
                    </p>
                </div>

                <a href=format!("/post/{}", post.id) class="post-card__body-link">
                    <h2 class="post-card__title">{post.title.clone()}</h2>
                    <p class="post-card__body">{post.body.clone()}</p>
                </a>

                {post.image.clone().map(|src| view! {
                    <img class="post-card__image" src=src alt=""/>
                })}

                <div class="post-card__footer">
                    <a href=format!("/post/{}", post.id) class="post-card__action">
                        {post.comment_count} " Komentar"
                    </a>
                    <span class="post-card__action">"Bagikan"</span>
                    <span class="post-card__action">"Simpan"</span>
                </div>

                {move || notice.get().map(|msg| view! {
                    <p class="post-card__notice">{msg}</p>
                })}
            </div>
        </div>
    }
}
