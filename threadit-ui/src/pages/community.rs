use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use server_fn::ServerFnError;
use threadit_app::domain::PostWithDetails;

use crate::components::{Avatar, ErrorDisplay, LoadingSpinner, PostCard};
use crate::pages::home::get_current_user;

#[server(GetPostsByTopicFn, "/api", endpoint = "posts_by_topic")]
pub async fn get_posts_by_topic(topic: String) -> Result<Vec<PostWithDetails>, ServerFnError> {
    use threadit_app::AppContext;

    let ctx = expect_context::<AppContext>();

    ctx.posts
        .list_by_topic(&topic, 25)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[component]
pub fn CommunityPage() -> impl IntoView {
    let params = use_params_map();
    let topic = Memo::new(move |_| params.read().get("topic").unwrap_or_default());

    let user = Resource::new(|| (), |_| get_current_user());
    let viewer = Signal::derive(move || {
        user.get()
            .and_then(|r| r.ok())
            .flatten()
            .map(|u| u.username)
    });

    let posts = Resource::new(move || topic.get(), get_posts_by_topic);

    view! {
        <div class="topbar">
            <a href="/" class="topbar__brand">"threadit"</a>
        </div>

        {move || view! {
            <div class="community-header">
                <Avatar seed=topic.get()/>
                <h1 class="community-header__title">"c/" {topic.get()}</h1>
            </div>
        }}

        <Suspense fallback=LoadingSpinner>
            {move || {
                posts.get().map(|result| {
                    match result {
                        Ok(list) => {
                            if list.is_empty() {
                                view! {
                                    <p class="feed__empty">"Belum ada post di komunitas ini."</p>
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
                            <ErrorDisplay message="Gagal memuat komunitas" on_retry=Callback::new(move |_| posts.refetch())/>
                        }.into_any()
                    }
                })
            }}
        </Suspense>
    }
}
