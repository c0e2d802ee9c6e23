//! Card grid for the item listing.

#[cfg(test)]
#[path = "item_grid_test.rs"]
mod item_grid_test;

use leptos::prelude::*;

use crate::net::types::{Item, ItemKind};
use crate::state::items::{can_mark_found, visible_items};

/// Heading for a card. Untitled postings fall back to their kind.
#[must_use]
pub fn display_title(item: &Item) -> String {
    let title = item.title.trim();
    if !title.is_empty() {
        return title.to_owned();
    }
    match item.kind {
        ItemKind::Lost => "Lost item".to_owned(),
        ItemKind::Found => "Found item".to_owned(),
    }
}

/// BEM class list for a card.
#[must_use]
pub fn card_class(item: &Item) -> String {
    let mut class = format!("item-card item-card--{}", item.kind.as_str());
    if item.resolved {
        class.push_str(" item-card--resolved");
    }
    class
}

/// Grid of item cards filtered by the resolved toggle.
#[component]
pub fn ItemGrid(
    #[prop(into)] items: Signal<Vec<Item>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] show_resolved: Signal<bool>,
    #[prop(into)] current_user_id: Signal<Option<String>>,
    #[prop(into)] on_mark_found: Callback<String>,
) -> impl IntoView {
    view! {
        <Show
            when=move || !loading.get() || !items.get().is_empty()
            fallback=|| view! { <p class="item-grid__status">"Loading items..."</p> }
        >
            {move || {
                let visible = visible_items(&items.get(), show_resolved.get());
                if visible.is_empty() {
                    return view! { <p class="item-grid__status">"No items to show yet."</p> }.into_any();
                }
                let user = current_user_id.get();
                view! {
                    <div class="item-grid">
                        {visible
                            .into_iter()
                            .map(|item| {
                                let can_resolve = can_mark_found(&item, user.as_deref());
                                view! { <ItemCard item=item can_resolve=can_resolve on_mark_found=on_mark_found/> }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }}
        </Show>
    }
}

/// One posting. Shows a "Mark as Found" button when `can_resolve`.
#[component]
pub fn ItemCard(item: Item, can_resolve: bool, on_mark_found: Callback<String>) -> impl IntoView {
    let class = card_class(&item);
    let title = display_title(&item);
    let badge = item.kind.as_str().to_ascii_uppercase();
    let Item { id, description, location, contact, image_url, created_at, resolved, .. } = item;

    view! {
        <article class=class>
            <header class="item-card__header">
                <span class="item-card__badge">{badge}</span>
                {resolved.then(|| view! { <span class="item-card__resolved">"Resolved"</span> })}
            </header>
            {image_url.map(|src| view! { <img class="item-card__image" src=src alt=title.clone()/> })}
            <h3 class="item-card__title">{title.clone()}</h3>
            {(!description.is_empty())
                .then(|| view! { <p class="item-card__description">{description}</p> })}
            {location.map(|place| view! { <p class="item-card__meta">"Location: " {place}</p> })}
            {contact.map(|reach| view! { <p class="item-card__meta">"Contact: " {reach}</p> })}
            {created_at.map(|at| view! { <p class="item-card__meta item-card__meta--time">{at}</p> })}
            {can_resolve
                .then(|| {
                    view! {
                        <button class="btn item-card__resolve" on:click=move |_| on_mark_found.run(id.clone())>
                            "Mark as Found"
                        </button>
                    }
                })}
        </article>
    }
}
