use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use server_fn::ServerFnError;
use threadit_app::domain::{Comment, PostWithDetails};
use uuid::Uuid;

use crate::components::{Avatar, ErrorDisplay, LoadingSpinner, PostCard};
use crate::pages::home::get_current_user;

#[server(GetPostFn, "/api", endpoint = "post_by_id")]
pub async fn get_post(post_id: Uuid) -> Result<Option<PostWithDetails>, ServerFnError> {
    use threadit_app::AppContext;

    let ctx = expect_context::<AppContext>();

    ctx.posts
        .find_by_id_with_details(post_id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[server(GetCommentsFn, "/api", endpoint = "comments_by_post")]
pub async fn get_comments(post_id: Uuid) -> Result<Vec<Comment>, ServerFnError> {
    use threadit_app::AppContext;

    let ctx = expect_context::<AppContext>();

    ctx.comments
        .list_by_post(post_id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[server(AddCommentFn, "/api", endpoint = "add_comment")]
pub async fn add_comment(post_id: Uuid, text: String) -> Result<Comment, ServerFnError> {
    use threadit_app::infrastructure::security::{InputSanitizer, WriteKey};
    use threadit_app::AppContext;

    let ctx = expect_context::<AppContext>();

    let Some(username) = crate::session_username().await else {
        return Err(ServerFnError::new("Kamu harus login dulu untuk komentar!"));
    };

    let key = WriteKey::for_request(Some(&username), crate::peer_ip());
    if let Err(e) = ctx.rate_limiter.check_write(key) {
        return Err(ServerFnError::new(e.user_message()));
    }

    let text = InputSanitizer::validate_comment(&text)
        .map_err(|e| ServerFnError::new(e.user_message()))?;

    ctx.comments
        .create(post_id, &username, &text)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[component]
pub fn PostPage() -> impl IntoView {
    let params = use_params_map();
    let post_id = Memo::new(move |_| {
        params
            .read()
            .get("id")
            .and_then(|s| Uuid::parse_str(&s).ok())
    });

    let user = Resource::new(|| (), |_| get_current_user());
    let viewer = Signal::derive(move || {
        user.get()
            .and_then(|r| r.ok())
            .flatten()
            .map(|u| u.username)
    });

    let post = Resource::new(
        move || post_id.get(),
        |id| async move {
            match id {
                Some(id) => get_post(id).await,
                None => Ok(None),
            }
        },
    );

    view! {
        <div class="topbar">
            <a href="/" class="topbar__brand">"threadit"</a>
        </div>

        <Suspense fallback=LoadingSpinner>
            {move || {
                post.get().map(|result| {
                    match result {
                        Ok(Some(found)) => {
                            let id = found.id;
                            view! {
                                <PostCard post=found viewer=viewer/>
                                <CommentSection post_id=id viewer=viewer/>
                            }.into_any()
                        }
                        Ok(None) => view! {
                            <p class="feed__empty">"Post tidak ditemukan."</p>
                        }.into_any(),
                        Err(_) => view! {
                            <ErrorDisplay message="Gagal memuat post" on_retry=Callback::new(move |_| post.refetch())/>
                        }.into_any(),
                    }
                })
            }}
        </Suspense>
    }
}

#[component]
fn CommentSection(post_id: Uuid, #[prop(into)] viewer: Signal<Option<String>>) -> impl IntoView {
    let comments = Resource::new(move || post_id, get_comments);
    let draft = RwSignal::new(String::new());
    let notice = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        if viewer.get_untracked().is_none() {
            notice.set(Some("Kamu harus login dulu untuk komentar!".to_string()));
            return;
        }

        spawn_local(async move {
            match add_comment(post_id, draft.get_untracked()).await {
                Ok(_) => {
                    draft.set(String::new());
                    notice.set(None);
                    comments.refetch();
                }
                Err(e) => notice.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="comments">
            <form class="comments__form" on:submit=on_submit>
                <textarea
                    class="comments__input"
                    placeholder="Apa pendapatmu?"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    required
                ></textarea>
                <button type="submit" class="comments__button">"Komentar"</button>
            </form>
            {move || notice.get().map(|msg| view! {
                <p class="comments__notice">{msg}</p>
            })}

            <Suspense fallback=LoadingSpinner>
                {move || {
                    comments.get().map(|result| {
                        match result {
                            Ok(list) => view! {
                                <ul class="comments__list">
                                    {list.into_iter().map(|comment| {
                                        let posted_at = comment
                                            .created_at
                                            .map(|t| t.format("%d %b %Y %H:%M").to_string())
                                            .unwrap_or_default();
                                        view! {
                                            <li class="comments__item">
                                                <Avatar seed=comment.username.clone()/>
                                                <div class="comments__content">
                                                    <p class="comments__meta">
                                                        "u/" {comment.username} " • " {posted_at}
                                                    </p>
                                                    <p class="comments__text">{comment.text}</p>
                                                </div>
                                            </li>
                                        }
                                    }).collect::<Vec<_>>()}
                                </ul>
                            }.into_any(),
                            Err(_) => view! {
                                <p class="comments__error">"Gagal memuat komentar"</p>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}
