//! Account registration page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::SessionStore;
use crate::util::form::{FormStatus, SIGNUP_CONFIRMATION, SIGNUP_FALLBACK};

/// Registration form. A successful sign-up does not sign the user in; the
/// page asks them to confirm their email instead.
#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<SessionStore>();

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
        let email_value = email.get_untracked().trim().to_owned();
        let password_value = password.get_untracked();
        leptos::task::spawn_local(async move {
            match session.sign_up(&email_value, &password_value).await {
                Ok(()) => status.update(|s| s.succeed(Some(SIGNUP_CONFIRMATION))),
                Err(e) => status.update(|s| s.fail(&e, SIGNUP_FALLBACK)),
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1 class="auth-card__title">"Sign Up"</h1>
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
                    autocomplete="new-password"
                    required=true
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <Show when=move || status.get().error.is_some()>
                    <p class="auth-message auth-message--error">{move || status.get().error.unwrap_or_default()}</p>
                </Show>
                <Show when=move || status.get().message.is_some()>
                    <p class="auth-message">{move || status.get().message.unwrap_or_default()}</p>
                </Show>
                <button class="auth-button" type="submit" disabled=move || status.get().loading>
                    {move || if status.get().loading { "Signing up..." } else { "Sign Up" }}
                </button>
                <p class="auth-card__switch">
                    "Already have an account? "
                    <A href="/login">"Login"</A>
                </p>
            </form>
        </div>
    }
}
