use leptos::prelude::*;

/// Deterministic avatar generated from a seed string (username or topic).
#[component]
pub fn Avatar(#[prop(into)] seed: String) -> impl IntoView {
    let src = format!("https://api.dicebear.com/9.x/open-peeps/svg?seed={}", seed);

    view! {
        <img class="avatar" src=src alt="Avatar"/>
    }
}
