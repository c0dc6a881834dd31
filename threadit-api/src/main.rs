use axum::{
    extract::{ConnectInfo, Query, Request},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use oauth2::PkceCodeVerifier;
use serde::Deserialize;
use threadit_app::domain::User;
use threadit_app::AppContext;
use threadit_ui::components::{AddVoteFn, SubmitPostFn};
use threadit_ui::pages::AddCommentFn;
use threadit_ui::App;
use tower_http::compression::CompressionLayer;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

#[derive(Deserialize)]
struct AuthCallback {
    code: String,
    state: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let app_context = AppContext::from_env().await;

    let routes = generate_route_list(App);

    server_fn::axum::register_explicit::<AddVoteFn>();
    server_fn::axum::register_explicit::<SubmitPostFn>();
    server_fn::axum::register_explicit::<AddCommentFn>();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)));

    let app = Router::new()
        .route("/auth/login", get({
            let ctx = app_context.clone();
            move |session: Session| {
                let ctx = ctx.clone();
                async move { handle_login(ctx, session).await }
            }
        }))
        .route("/auth/callback", get({
            let ctx = app_context.clone();
            move |query: Query<AuthCallback>, session: Session| {
                let ctx = ctx.clone();
                async move { handle_callback(ctx, session, query.0).await }
            }
        }))
        .route("/auth/logout", post(handle_logout))
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |ConnectInfo(peer): ConnectInfo<SocketAddr>, session: Session, req: Request| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || {
                            provide_context(ctx.clone());
                            provide_context(session.clone());
                            provide_context(peer);
                        },
                        req,
                    )
                    .await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(session_layer)
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

async fn handle_login(ctx: AppContext, session: Session) -> Response {
    let (auth_url, csrf_token, pkce_verifier) = ctx.oauth.get_auth_url();

    let stored_csrf = session.insert("oauth_csrf", csrf_token.secret()).await;
    let stored_pkce = session.insert("oauth_pkce", pkce_verifier.secret()).await;
    if stored_csrf.is_err() || stored_pkce.is_err() {
        tracing::error!("Failed to store OAuth state in session");
        return Redirect::to("/").into_response();
    }

    Redirect::to(&auth_url).into_response()
}

async fn handle_callback(ctx: AppContext, session: Session, query: AuthCallback) -> Response {
    let stored_csrf: Option<String> = session.remove("oauth_csrf").await.ok().flatten();
    let stored_pkce: Option<String> = session.remove("oauth_pkce").await.ok().flatten();

    let (Some(stored_csrf), Some(stored_pkce)) = (stored_csrf, stored_pkce) else {
        tracing::warn!("OAuth callback without stored state");
        return Redirect::to("/").into_response();
    };

    if stored_csrf != query.state {
        tracing::warn!("OAuth state mismatch");
        return Redirect::to("/").into_response();
    }

    let info = match ctx
        .oauth
        .exchange_code(&query.code, PkceCodeVerifier::new(stored_pkce))
        .await
    {
        Ok(info) => info,
        Err(e) => {
            tracing::error!("OAuth code exchange failed: {}", e);
            return Redirect::to("/").into_response();
        }
    };

    let user = User::new(
        info.sub.clone(),
        info.email.clone(),
        info.suggested_username(),
        info.picture.clone(),
    );

    match ctx.users.upsert(&user).await {
        Ok(model) => {
            if let Err(e) = session.insert("user_id", model.id).await {
                tracing::error!("Failed to store user in session: {}", e);
            } else {
                tracing::info!(username = %model.username, "user logged in");
            }
        }
        Err(e) => tracing::error!("User upsert failed: {}", e),
    }

    Redirect::to("/").into_response()
}

async fn handle_logout(session: Session) -> Response {
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to clear session: {}", e);
    }
    Redirect::to("/").into_response()
}

const CSS: &str = r#"
:root {
    --bg: #dae0e6;
    --surface: #ffffff;
    --border: #ccc;
    --border-dark: #878a8c;
    --text: #1c1c1c;
    --muted: #7c7c7c;
    --upvote: #ff4500;
    --downvote: #7193ff;
    --link: #0079d3;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'Inter', -apple-system, sans-serif;
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
}
.container { max-width: 700px; margin: 0 auto; padding: 1rem; }
.topbar { display: flex; align-items: center; justify-content: space-between; padding: 0.5rem 0 1rem; }
.topbar__brand { font-size: 1.4rem; font-weight: 800; color: var(--upvote); text-decoration: none; }
.auth { display: flex; align-items: center; gap: 0.75rem; }
.auth__name { font-weight: 600; font-size: 0.9rem; }
.auth__login { color: var(--link); text-decoration: none; font-weight: 600; font-size: 0.9rem; }
.auth__logout { background: none; border: 1px solid var(--border-dark); border-radius: 999px; padding: 0.25rem 0.75rem; cursor: pointer; font-size: 0.8rem; }
.post-box { background: var(--surface); border: 1px solid var(--border); border-radius: 6px; padding: 0.75rem; margin-bottom: 1rem; display: flex; flex-direction: column; gap: 0.5rem; }
.post-box__input, .post-box__textarea, .comments__input {
    width: 100%; padding: 0.5rem 0.75rem; border: 1px solid var(--border);
    border-radius: 4px; background: #f6f7f8; font-size: 0.95rem;
}
.post-box__row { display: flex; gap: 0.5rem; }
.communities { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-bottom: 1rem; }
.communities__item {
    background: var(--surface); border: 1px solid var(--border); border-radius: 999px;
    padding: 0.25rem 0.75rem; font-size: 0.85rem; font-weight: 600;
    color: var(--text); text-decoration: none;
}
.communities__item:hover { border-color: var(--border-dark); color: var(--link); }
.post-box__button, .comments__button {
    align-self: flex-end; padding: 0.4rem 1.25rem; background: var(--link); color: #fff;
    border: none; border-radius: 999px; font-weight: 600; cursor: pointer;
}
.post-box__notice, .comments__notice, .post-card__notice { color: var(--upvote); font-size: 0.85rem; }
.feed { display: flex; flex-direction: column; gap: 0.75rem; }
.feed__empty { text-align: center; color: var(--muted); padding: 2rem; }
.post-card { display: flex; background: var(--surface); border: 1px solid var(--border); border-radius: 6px; }
.post-card:hover { border-color: var(--border-dark); }
.post-card__votes { display: flex; flex-direction: column; align-items: center; gap: 0.25rem; padding: 0.75rem 0.5rem; background: #f8f9fa; border-radius: 6px 0 0 6px; }
.post-card__arrow { background: none; border: none; color: var(--muted); font-size: 1rem; cursor: pointer; }
.post-card__arrow:hover { color: var(--upvote); }
.post-card__arrow--active-up { color: var(--upvote); }
.post-card__arrow--active-down { color: var(--downvote); }
.post-card__score { font-weight: 700; font-size: 0.85rem; }
.post-card__main { padding: 0.75rem; flex: 1; }
.post-card__header { display: flex; align-items: center; gap: 0.5rem; }
.post-card__meta { font-size: 0.75rem; color: var(--muted); }
.post-card__community { color: var(--text); font-weight: 700; text-decoration: none; }
.post-card__community:hover { color: var(--link); }
.post-card__body-link { text-decoration: none; color: var(--text); display: block; margin: 0.5rem 0; }
.post-card__title { font-size: 1.1rem; font-weight: 600; }
.post-card__body { margin-top: 0.25rem; font-size: 0.9rem; font-weight: 300; }
.post-card__image { width: 100%; border-radius: 4px; }
.post-card__footer { display: flex; gap: 1rem; margin-top: 0.5rem; }
.post-card__action { font-size: 0.8rem; color: var(--muted); text-decoration: none; }
.avatar { width: 36px; height: 36px; border-radius: 50%; background: #fff; border: 1px solid var(--border); }
.community-header { display: flex; align-items: center; gap: 0.75rem; margin-bottom: 1rem; }
.community-header__title { font-size: 1.4rem; }
.comments { background: var(--surface); border: 1px solid var(--border); border-radius: 6px; padding: 0.75rem; margin-top: 0.75rem; }
.comments__form { display: flex; flex-direction: column; gap: 0.5rem; }
.comments__list { list-style: none; margin-top: 1rem; display: flex; flex-direction: column; gap: 0.75rem; }
.comments__item { display: flex; gap: 0.5rem; }
.comments__meta { font-size: 0.75rem; color: var(--muted); }
.comments__text { font-size: 0.9rem; }
.comments__error { color: var(--muted); }
.loading { display: flex; flex-direction: column; align-items: center; padding: 3rem; }
.loading__spinner {
    width: 40px; height: 40px; border: 4px solid var(--border);
    border-top-color: var(--upvote); border-radius: 50%; animation: spin 1s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
.loading__text { margin-top: 1rem; color: var(--muted); font-style: italic; }
.error { background: #fde8e4; border: 1px solid var(--upvote); border-radius: 6px; padding: 1rem; }
.error__title { font-weight: 700; margin-bottom: 0.25rem; }
.error__retry { margin-top: 0.5rem; padding: 0.4rem 1rem; background: var(--upvote); color: #fff; border: none; border-radius: 4px; cursor: pointer; }
"#;

fn shell(_options: LeptosOptions) -> impl IntoView {
    use leptos::prelude::*;
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="id">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>"Threadit | Komunitas Diskusi Indonesia"</title>
                <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🧵</text></svg>"/>
                <style>{CSS}</style>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
