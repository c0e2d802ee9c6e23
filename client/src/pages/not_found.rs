//! Fallback page for unknown routes.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let location = use_location();
    leptos::logging::warn!("404: no route for {}", location.pathname.get_untracked());

    view! {
        <div class="not-found-page">
            <h1 class="not-found-page__code">"404"</h1>
            <p class="not-found-page__message">"Oops! Page not found"</p>
            <A href="/">"Return to Home"</A>
        </div>
    }
}
