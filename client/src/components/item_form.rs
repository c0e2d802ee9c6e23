//! "Post Item" form for reporting a lost or found item.

use leptos::prelude::*;

use crate::net::types::{ItemKind, NewItem};
use crate::util::item_draft::ItemDraft;

/// Collects a draft and hands a validated [`NewItem`] to `on_submit`.
///
/// `busy` disables the submit button while the parent is saving; `error`
/// shows the parent's last save failure.
#[component]
pub fn ItemForm(
    #[prop(into)] on_submit: Callback<NewItem>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    let draft = RwSignal::new(ItemDraft::default());
    let invalid = RwSignal::new(None::<&'static str>);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        match draft.get_untracked().to_new_item() {
            Ok(item) => {
                invalid.set(None);
                on_submit.run(item);
            }
            Err(message) => invalid.set(Some(message)),
        }
    };

    let problem = move || invalid.get().map(str::to_owned).or_else(|| error.get());

    view! {
        <form class="item-form" on:submit=submit>
            <h3 class="item-form__title">"Report an Item"</h3>
            <label class="item-form__field">
                <span>"Type"</span>
                <select
                    class="item-form__input"
                    prop:value=move || draft.get().kind.as_str()
                    on:change=move |ev| {
                        let kind = ItemKind::from_form_value(&event_target_value(&ev));
                        draft.update(|d| d.kind = kind);
                    }
                >
                    <option value="lost">"Lost"</option>
                    <option value="found">"Found"</option>
                </select>
            </label>
            <label class="item-form__field">
                <span>"Title"</span>
                <input
                    class="item-form__input"
                    type="text"
                    placeholder="Blue water bottle"
                    prop:value=move || draft.get().title
                    on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                />
            </label>
            <label class="item-form__field">
                <span>"Description"</span>
                <textarea
                    class="item-form__input item-form__input--area"
                    rows="3"
                    placeholder="Any details that help identify it"
                    prop:value=move || draft.get().description
                    on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                ></textarea>
            </label>
            <label class="item-form__field">
                <span>"Location"</span>
                <input
                    class="item-form__input"
                    type="text"
                    placeholder="Library, 2nd floor"
                    prop:value=move || draft.get().location
                    on:input=move |ev| draft.update(|d| d.location = event_target_value(&ev))
                />
            </label>
            <label class="item-form__field">
                <span>"Contact"</span>
                <input
                    class="item-form__input"
                    type="text"
                    placeholder="Email or phone"
                    prop:value=move || draft.get().contact
                    on:input=move |ev| draft.update(|d| d.contact = event_target_value(&ev))
                />
            </label>
            <label class="item-form__field">
                <span>"Image URL"</span>
                <input
                    class="item-form__input"
                    type="url"
                    placeholder="https://"
                    prop:value=move || draft.get().image_url
                    on:input=move |ev| draft.update(|d| d.image_url = event_target_value(&ev))
                />
            </label>
            <Show when=move || problem().is_some()>
                <p class="item-form__error">{move || problem().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Posting..." } else { "Post Item" }}
            </button>
        </form>
    }
}
