//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::net::backend::{AuthBackend, ItemTable};
use crate::net::supabase::SupabaseClient;
use crate::pages::{index::IndexPage, login::LoginPage, not_found::NotFoundPage, signup::SignupPage};
use crate::state::items::{ItemsState, ItemsStore};
use crate::state::session::{AuthState, SessionStore};

/// Whether the browser has loaded the backend settings from `/api/config`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackendReady(pub bool);

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the backend client and both stores, provides them as context, and
/// sets up client-side routing. The session subscription is released when
/// the app is torn down.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let backend = SupabaseClient::new();
    let auth_backend: Arc<dyn AuthBackend> = Arc::new(backend.clone());
    let item_table: Arc<dyn ItemTable> = Arc::new(backend.clone());

    let session = SessionStore::new(auth_backend, RwSignal::new(AuthState::default()));
    let items = ItemsStore::new(item_table, RwSignal::new(ItemsState::default()));
    let ready = RwSignal::new(BackendReady(false));

    provide_context(session.clone());
    provide_context(items);
    provide_context(ready);

    let session_teardown = session.clone();
    on_cleanup(move || session_teardown.shutdown());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_backend_config().await {
            Ok(config) => {
                backend.configure(config);
                ready.set(BackendReady(true));
            }
            Err(e) => log::error!("backend config unavailable: {e}"),
        }
        session.load_snapshot().await;
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (backend, session);

    view! {
        <Stylesheet id="leptos" href="/pkg/lostfound.css"/>
        <Title text="Campus Lost & Found"/>

        <Router>
            <Routes fallback=NotFoundPage>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route
                    path=StaticSegment("")
                    view=|| view! { <ProtectedRoute><IndexPage/></ProtectedRoute> }
                />
            </Routes>
        </Router>
    }
}
