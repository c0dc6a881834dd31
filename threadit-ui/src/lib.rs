pub mod components;
pub mod pages;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use pages::{CommunityPage, HomePage, PostPage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Threadit | Komunitas Diskusi Indonesia"/>
        <Meta name="description" content="Forum diskusi: post, vote, dan komentar"/>
        <Stylesheet id="leptos" href="/pkg/threadit.css"/>

        <Router>
            <main class="container">
                <Routes fallback=|| "Halaman tidak ditemukan">
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/post/:id") view=PostPage/>
                    <Route path=path!("/c/:topic") view=CommunityPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Username of the signed-in viewer, read from the session cookie. `None`
/// when there is no session context or no valid login, never an error:
/// unauthenticated is a normal state here, the vote/post paths decide what
/// to do with it.
#[cfg(feature = "ssr")]
pub(crate) async fn session_username() -> Option<String> {
    use leptos::prelude::use_context;
    use threadit_app::AppContext;
    use tower_sessions::Session;

    let session = use_context::<Session>()?;
    let ctx = use_context::<AppContext>()?;

    let user_id: uuid::Uuid = session.get("user_id").await.ok().flatten()?;
    let model = ctx.users.find_by_id(user_id).await.ok().flatten()?;
    Some(model.username)
}

/// Peer address of the current request, provided as context by the server-fn
/// route. Falls back to loopback for calls made outside that route, such as
/// during an SSR render.
#[cfg(feature = "ssr")]
pub(crate) fn peer_ip() -> std::net::IpAddr {
    use leptos::prelude::use_context;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    use_context::<SocketAddr>()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
