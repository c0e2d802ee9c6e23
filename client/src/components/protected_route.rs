//! Route wrapper that only renders its children for a signed-in user.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionStore;
use crate::util::auth::{GuardDecision, LOGIN_PATH, guard_decision};

/// Renders `children` while an identity is present and redirects to
/// `/login` whenever the session resolves to none. Re-evaluated on every
/// session change, not just on mount. A boot snapshot that has not landed
/// within `SNAPSHOT_WAIT_MS` counts as signed out.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<SessionStore>().state();
    let navigate = use_navigate();
    let waited_out = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(crate::util::auth::SNAPSHOT_WAIT_MS)).await;
        let _ = waited_out.try_set(true);
    });

    let decision = move || guard_decision(&auth.get(), waited_out.get());

    Effect::new(move || {
        if decision() == GuardDecision::Redirect {
            navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <Show
            when=move || decision() == GuardDecision::Render
            fallback=move || {
                view! {
                    <div class="guard-placeholder">
                        <p>
                            {move || {
                                if decision() == GuardDecision::Pending { "Loading..." } else { "Redirecting to login..." }
                            }}
                        </p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
