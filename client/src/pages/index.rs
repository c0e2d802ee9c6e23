//! Protected landing page: post items, browse the board, see impact stats.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered only behind `ProtectedRoute`. The item list is fetched once the
//! browser has loaded the backend settings; later changes come from this
//! page's own add and mark-found actions.

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;

use leptos::prelude::*;

use crate::app::BackendReady;
use crate::components::item_form::ItemForm;
use crate::components::item_grid::ItemGrid;
use crate::components::magnet_lines_background::MagnetLinesBackground;
use crate::net::error::DataError;
use crate::net::types::{Item, NewItem};
use crate::state::items::{ItemStats, ItemsStore};
use crate::state::session::SessionStore;

const ITEMS_SECTION_ID: &str = "items-section";

/// Visibility and save status of the "Post Item" panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostFormState {
    pub open: bool,
    pub saving: bool,
    /// Last save failure; cleared whenever the panel is opened afresh.
    pub error: Option<String>,
}

impl PostFormState {
    /// Header button: flip the panel.
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.error = None;
    }

    /// Hero button: open the panel, keeping an already-open one as is.
    pub fn show(&mut self) {
        if !self.open {
            self.open = true;
            self.error = None;
        }
    }

    pub fn begin_save(&mut self) {
        self.saving = true;
        self.error = None;
    }

    /// A successful add collapses the panel; a failure keeps it open with
    /// the message.
    pub fn finish_save(&mut self, result: &Result<Item, DataError>) {
        self.saving = false;
        match result {
            Ok(_) => self.open = false,
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

#[component]
pub fn IndexPage() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let items = expect_context::<ItemsStore>();
    let ready = expect_context::<RwSignal<BackendReady>>();
    let auth = session.state();
    let items_state = items.state();

    let post_form = RwSignal::new(PostFormState::default());
    let show_resolved = RwSignal::new(true);
    let action_error = RwSignal::new(None::<String>);

    let fetch_store = items.clone();
    Effect::new(move |fetched: Option<bool>| {
        if fetched == Some(true) {
            return true;
        }
        if !ready.get().0 {
            return false;
        }
        let store = fetch_store.clone();
        leptos::task::spawn_local(async move { store.refresh().await });
        true
    });

    let add_store = items.clone();
    let add_session = session.clone();
    let on_add = Callback::new(move |payload: NewItem| {
        let store = add_store.clone();
        let identity = add_session.current_identity();
        post_form.update(PostFormState::begin_save);
        leptos::task::spawn_local(async move {
            let result = store.add_item(payload, identity.as_ref()).await;
            post_form.update(|form| form.finish_save(&result));
        });
    });

    let found_store = items.clone();
    let on_mark_found = Callback::new(move |item_id: String| {
        let store = found_store.clone();
        action_error.set(None);
        leptos::task::spawn_local(async move {
            if let Err(e) = store.mark_as_found(&item_id).await {
                action_error.set(Some(e.to_string()));
            }
        });
    });

    let on_logout = move |_| {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = session.logout().await {
                leptos::logging::warn!("sign-out failed: {e}");
            }
        });
    };

    let stats = move || ItemStats::from_items(&items_state.get().items);
    let signed_in_as = move || {
        auth.get()
            .identity
            .and_then(|identity| identity.email)
            .unwrap_or_default()
    };

    view! {
        <div class="index-page">
            <MagnetLinesBackground color="#4f46e5" speed=0.2 intensity=0.7/>

            <header class="index-page__header">
                <div class="index-page__brand">
                    <span class="index-page__logo">"🎓"</span>
                    <div>
                        <h1 class="index-page__title">"Campus Lost & Found"</h1>
                        <p class="index-page__tagline">"Help students reconnect with their items"</p>
                    </div>
                </div>
                <div class="index-page__actions">
                    <span class="index-page__self">{signed_in_as}</span>
                    <button class="btn btn--primary" on:click=move |_| post_form.update(PostFormState::toggle)>
                        "+ Post Item"
                    </button>
                    <button class="btn" on:click=on_logout>"Logout"</button>
                </div>
            </header>

            <section class="hero">
                <h2 class="hero__title">"Lost Something? Found Something?"</h2>
                <p class="hero__subtitle">
                    "Connect with your campus community to reunite lost items with their owners"
                </p>
                <div class="hero__actions">
                    <button class="btn btn--primary" on:click=move |_| post_form.update(PostFormState::show)>
                        "+ Post Lost Item"
                    </button>
                    <button class="btn btn--outline" on:click=move |_| scroll_to_items()>
                        "Browse Items"
                    </button>
                </div>
            </section>

            <main class="index-page__main">
                <Show when=move || post_form.get().open>
                    <section class="index-page__form">
                        <ItemForm
                            on_submit=on_add
                            busy=Signal::derive(move || post_form.get().saving)
                            error=Signal::derive(move || post_form.get().error)
                        />
                    </section>
                </Show>

                <section id=ITEMS_SECTION_ID class="items-section">
                    <div class="items-section__header">
                        <h2>"Browse Items"</h2>
                        <button class="btn btn--outline" on:click=move |_| show_resolved.update(|v| *v = !*v)>
                            {move || if show_resolved.get() { "👁️ Hide Resolved" } else { "👁️ Show Resolved" }}
                        </button>
                    </div>
                    <Show when=move || items_state.get().error.is_some()>
                        <p class="items-section__error">{move || items_state.get().error.unwrap_or_default()}</p>
                    </Show>
                    <Show when=move || action_error.get().is_some()>
                        <p class="items-section__error">{move || action_error.get().unwrap_or_default()}</p>
                    </Show>
                    <ItemGrid
                        items=Signal::derive(move || items_state.get().items)
                        loading=Signal::derive(move || items_state.get().loading)
                        show_resolved=show_resolved
                        current_user_id=Signal::derive(move || auth.get().identity.map(|identity| identity.id))
                        on_mark_found=on_mark_found
                    />
                </section>

                <section class="stats">
                    <h3 class="stats__title">"Community Impact"</h3>
                    <p class="stats__subtitle">"Help make our campus a better place"</p>
                    <div class="stats__grid">
                        <div class="stats__cell">
                            <div class="stats__value stats__value--total">{move || stats().total}</div>
                            <div class="stats__label">"Total Items Posted"</div>
                        </div>
                        <div class="stats__cell">
                            <div class="stats__value stats__value--found">{move || stats().found}</div>
                            <div class="stats__label">"Items Found"</div>
                        </div>
                        <div class="stats__cell">
                            <div class="stats__value stats__value--resolved">{move || stats().resolved}</div>
                            <div class="stats__label">"Items Resolved"</div>
                        </div>
                    </div>
                </section>
            </main>

            <footer class="index-page__footer">
                "Campus Lost & Found Portal • Connecting Students • Building Community"
            </footer>
        </div>
    }
}

fn scroll_to_items() {
    #[cfg(feature = "hydrate")]
    {
        let Some(target) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(ITEMS_SECTION_ID))
        else {
            return;
        };
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
