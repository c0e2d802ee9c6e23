//! Email + password sign-in page.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::net::error::AuthError;
use crate::state::session::SessionStore;
use crate::util::form::{FormStatus, LOGIN_FALLBACK};

/// Where a successful sign-in lands.
pub const AFTER_LOGIN_PATH: &str = "/";

/// Settle the form after a sign-in attempt. Returns the path to navigate
/// to, or `None` when the form stays put showing the error.
pub fn finish_login(status: &mut FormStatus, result: Result<(), AuthError>) -> Option<&'static str> {
    match result {
        Ok(()) => {
            status.succeed(None);
            Some(AFTER_LOGIN_PATH)
        }
        Err(e) => {
            status.fail(&e, LOGIN_FALLBACK);
            None
        }
    }
}

/// Sign-in form. Navigates to `/` once the backend accepts the credentials;
/// the guard there picks up the identity from the session store.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let status = RwSignal::new(FormStatus::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().loading {
            return;
        }
        status.update(FormStatus::begin);

        let session = session.clone();
        let navigate = navigate.clone();
        let email_value = email.get_untracked().trim().to_owned();
        let password_value = password.get_untracked();
        leptos::task::spawn_local(async move {
            let result = session.login(&email_value, &password_value).await;
            if let Some(path) = status.try_update(|s| finish_login(s, result)).flatten() {
                navigate(path, NavigateOptions::default());
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1 class="auth-card__title">"Login"</h1>
                <input
                    class="auth-input"
                    type="email"
                    placeholder="Email"
                    autocomplete="email"
                    required=true
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    required=true
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <Show when=move || status.get().error.is_some()>
                    <p class="auth-message auth-message--error">{move || status.get().error.unwrap_or_default()}</p>
                </Show>
                <button class="auth-button" type="submit" disabled=move || status.get().loading>
                    {move || if status.get().loading { "Logging in..." } else { "Login" }}
                </button>
                <p class="auth-card__switch">
                    "Don't have an account? "
                    <A href="/signup">"Sign Up"</A>
                </p>
            </form>
        </div>
    }
}
