use leptos::prelude::*;
use server_fn::ServerFnError;
use threadit_app::domain::{Community, PostWithDetails, User};

use crate::components::{ErrorDisplay, LoadingSpinner, PostBox, PostCard};

#[server(GetCurrentUserFn, "/api", endpoint = "current_user")]
pub async fn get_current_user() -> Result<Option<User>, ServerFnError> {
    use threadit_app::AppContext;
    use tower_sessions::Session;

    // use_context instead of expect_context so plain SSR renders without a
    // session still work.
    let Some(session) = use_context::<Session>() else {
        return Ok(None);
    };
    let Some(ctx) = use_context::<AppContext>() else {
        return Ok(None);
    };

    let user_id: Option<uuid::Uuid> = session.get("user_id").await.ok().flatten();

    match user_id {
        Some(id) => {
            let model = ctx
                .users
                .find_by_id(id)
                .await
                .map_err(|e| ServerFnError::new(e.to_string()))?;

            Ok(model.map(|m| User {
                id: m.id,
                google_id: m.google_id,
                email: m.email,
                username: m.username,
                avatar_url: m.avatar_url,
                created_at: m.created_at,
                updated_at: m.updated_at,
            }))
        }
        None => Ok(None),
    }
}

#[server(GetPostsFn, "/api", endpoint = "posts")]
pub async fn get_posts() -> Result<Vec<PostWithDetails>, ServerFnError> {
    use threadit_app::AppContext;

    let ctx = expect_context::<AppContext>();

    ctx.posts
        .list_recent(25)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[server(GetCommunitiesFn, "/api", endpoint = "communities")]
pub async fn get_communities() -> Result<Vec<Community>, ServerFnError> {
    use threadit_app::AppContext;

    let ctx = expect_context::<AppContext>();

    let models = ctx
        .communities
        .list(10)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(models
        .into_iter()
        .map(|m| Community {
            id: m.id,
            topic: m.topic,
            created_at: m.created_at,
        })
        .collect())
}

#[component]
pub fn HomePage() -> impl IntoView {
    let user = Resource::new(|| (), |_| get_current_user());
    let posts = Resource::new(|| (), |_| get_posts());
    let communities = Resource::new(|| (), |_| get_communities());

    let viewer = Signal::derive(move || {
        user.get()
            .and_then(|r| r.ok())
            .flatten()
            .map(|u| u.username)
    });

    view! {
        <div class="topbar">
            <a href="/" class="topbar__brand">"threadit"</a>
            <AuthSection user=user/>
        </div>

        <Suspense fallback=|| ()>
            {move || {
                communities.get().and_then(|r| r.ok()).map(|list| {
                    (!list.is_empty()).then(|| view! {
                        <nav class="communities">
                            {list.into_iter().map(|c| {
                                let href = format!("/c/{}", c.topic);
                                view! {
                                    <a href=href class="communities__item">"c/" {c.topic}</a>
                                }
                            }).collect::<Vec<_>>()}
                        </nav>
                    })
                })
            }}
        </Suspense>

        <PostBox viewer=viewer on_created=move |_| {
            posts.refetch();
            communities.refetch();
        }/>

        <Suspense fallback=LoadingSpinner>
            {move || {
                posts.get().map(|result| {
                    match result {
                        Ok(list) => {
                            if list.is_empty() {
                                view! {
                                    <p class="feed__empty">"Belum ada post. Jadilah yang pertama!"</p>
                                }.into_any()
                            } else {
                                view! {
                                    <div class="feed">
                                        {list.into_iter().map(|post| view! {
                                            <PostCard post=post viewer=viewer/>
                                        }).collect::<Vec<_>>()}
                                    </div>
                                }.into_any()
                            }
                        }
                        Err(_) => view! {
                            <ErrorDisplay message="Gagal memuat feed" on_retry=Callback::new(move |_| posts.refetch())/>
                        }.into_any()
                    }
                })
            }}
        </Suspense>
    }
}

#[component]
pub fn AuthSection(user: Resource<Result<Option<User>, ServerFnError>>) -> impl IntoView {
    view! {
        <Suspense fallback=|| ()>
            {move || {
                user.get().map(|result| {
                    match result.ok().flatten() {
                        Some(u) => view! {
                            <div class="auth">
                                <span class="auth__name">"u/" {u.username}</span>
                                <form action="/auth/logout" method="post" class="auth__form">
                                    <button type="submit" class="auth__logout">"Logout"</button>
                                </form>
                            </div>
                        }.into_any(),
                        None => view! {
                            <div class="auth">
                                <a href="/auth/login" class="auth__login">"Login dengan Google"</a>
                            </div>
                        }.into_any(),
                    }
                })
            }}
        </Suspense>
    }
}
