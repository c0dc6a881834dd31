use leptos::prelude::*;
use leptos::task::spawn_local;
use server_fn::ServerFnError;
use threadit_app::domain::PostWithDetails;

#[server(SubmitPostFn, "/api", endpoint = "submit_post")]
pub async fn submit_post(
    title: String,
    body: String,
    image: String,
    topic: String,
) -> Result<PostWithDetails, ServerFnError> {
    use threadit_app::domain::Post;
    use threadit_app::infrastructure::security::{InputSanitizer, WriteKey};
    use threadit_app::AppContext;

    let ctx = expect_context::<AppContext>();

    let Some(username) = crate::session_username().await else {
        return Err(ServerFnError::new("Kamu harus login dulu untuk post!"));
    };

    let key = WriteKey::for_request(Some(&username), crate::peer_ip());
    if let Err(e) = ctx.rate_limiter.check_write(key) {
        return Err(ServerFnError::new(e.user_message()));
    }

    let title = InputSanitizer::validate_title(&title)
        .map_err(|e| ServerFnError::new(e.user_message()))?;
    let body = InputSanitizer::validate_body(&body)
        .map_err(|e| ServerFnError::new(e.user_message()))?;
    let image = InputSanitizer::validate_image_url(&image)
        .map_err(|e| ServerFnError::new(e.user_message()))?;
    let topic = InputSanitizer::validate_topic(&topic)
        .map_err(|e| ServerFnError::new(e.user_message()))?;

    let community = ctx
        .communities
        .find_or_create(&topic)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let post = Post::new(title, body, image, username, community.id);
    let model = ctx
        .posts
        .create(&post)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(post_id = %model.id, topic, "post created");

    ctx.posts
        .find_by_id_with_details(model.id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?
        .ok_or_else(|| ServerFnError::new("Post tidak ditemukan"))
}

#[component]
pub fn PostBox(
    #[prop(into)] viewer: Signal<Option<String>>,
    #[prop(into)] on_created: Callback<()>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let image = RwSignal::new(String::new());
    let topic = RwSignal::new(String::new());
    let notice = RwSignal::new(Option::<String>::None);
    let is_submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        if viewer.get_untracked().is_none() {
            notice.set(Some("Kamu harus login dulu untuk post!".to_string()));
            return;
        }

        is_submitting.set(true);
        spawn_local(async move {
            let result = submit_post(
                title.get_untracked(),
                body.get_untracked(),
                image.get_untracked(),
                topic.get_untracked(),
            )
            .await;

            is_submitting.set(false);
            match result {
                Ok(_) => {
                    title.set(String::new());
                    body.set(String::new());
                    image.set(String::new());
                    topic.set(String::new());
                    notice.set(None);
                    on_created.run(());
                }
                Err(e) => notice.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <form class="post-box" on:submit=on_submit>
            <input
                type="text"
                class="post-box__input"
                placeholder="Buat post baru..."
                prop:value=move || title.get()
                on:input=move |ev| title.set(event_target_value(&ev))
                required
            />
            <textarea
                class="post-box__textarea"
                placeholder="Isi post (opsional)"
                prop:value=move || body.get()
                on:input=move |ev| body.set(event_target_value(&ev))
            ></textarea>
            <div class="post-box__row">
                <input
                    type="text"
                    class="post-box__input"
                    placeholder="Komunitas (contoh: rustacean)"
                    prop:value=move || topic.get()
                    on:input=move |ev| topic.set(event_target_value(&ev))
                    required
                />
                <input
                    type="url"
                    class="post-box__input"
                    placeholder="URL gambar (opsional)"
                    prop:value=move || image.get()
                    on:input=move |ev| image.set(event_target_value(&ev))
                />
            </div>
            <button type="submit" class="post-box__button" prop:disabled=move || is_submitting.get()>
                {move || if is_submitting.get() { "Mengirim..." } else { "Post!" }}
            </button>
            {move || notice.get().map(|msg| view! {
                <p class="post-box__notice">{msg}</p>
            })}
        </form>
    }
}
