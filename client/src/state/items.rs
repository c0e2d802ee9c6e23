//! Item-list state and mutations for the board view.
//!
//! DESIGN
//! ======
//! The collection is a client-side cache of the backend table. Writes go to
//! the backend first and touch the cache only after the backend accepts
//! them, so a rejected write leaves the visible list unchanged.

#[cfg(test)]
#[path = "items_test.rs"]
mod items_test;

use std::sync::Arc;

use leptos::prelude::*;

use super::cell::StateCell;
use crate::net::backend::ItemTable;
use crate::net::error::DataError;
use crate::net::types::{Identity, Item, ItemKind, NewItem};

/// Shared item collection plus fetch status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemsState {
    /// Backend order; the table is read newest first.
    pub items: Vec<Item>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Counters for the "Community Impact" panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemStats {
    pub total: usize,
    pub found: usize,
    pub resolved: usize,
}

impl ItemStats {
    #[must_use]
    pub fn from_items(items: &[Item]) -> Self {
        Self {
            total: items.len(),
            found: items.iter().filter(|item| item.kind == ItemKind::Found).count(),
            resolved: items.iter().filter(|item| item.resolved).count(),
        }
    }
}

/// Items shown in the grid, honoring the show/hide-resolved toggle.
#[must_use]
pub fn visible_items(items: &[Item], show_resolved: bool) -> Vec<Item> {
    items
        .iter()
        .filter(|item| show_resolved || !item.resolved)
        .cloned()
        .collect()
}

/// Whether `current_user_id` may mark `item` as found.
///
/// Postings with a creator can only be resolved by that creator; anonymous
/// postings by anyone signed in.
#[must_use]
pub fn can_mark_found(item: &Item, current_user_id: Option<&str>) -> bool {
    if item.resolved {
        return false;
    }
    match (item.created_by.as_deref(), current_user_id) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(owner), Some(user)) => owner == user,
    }
}

/// Item store over an [`ItemTable`]. Clones share state.
#[derive(Clone)]
pub struct ItemsStore<C = RwSignal<ItemsState>>
where
    C: StateCell<ItemsState>,
{
    table: Arc<dyn ItemTable>,
    state: C,
}

impl<C: StateCell<ItemsState>> ItemsStore<C> {
    pub fn new(table: Arc<dyn ItemTable>, state: C) -> Self {
        Self { table, state }
    }

    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        self.state.snapshot().items
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.snapshot().loading
    }

    /// Handle to the underlying state for reactive reads.
    #[must_use]
    pub fn state(&self) -> C {
        self.state.clone()
    }

    /// Re-read the whole table. On failure the previous collection stays
    /// visible and the message lands in `error`.
    pub async fn refresh(&self) {
        self.state.apply(|s| {
            s.loading = true;
            s.error = None;
        });
        match self.table.list().await {
            Ok(items) => self.state.apply(|s| {
                s.items = items;
                s.loading = false;
            }),
            Err(e) => {
                leptos::logging::warn!("item fetch failed: {e}");
                self.state.apply(|s| {
                    s.loading = false;
                    s.error = Some(e.to_string());
                });
            }
        }
    }

    /// Post a new item, stamping `created_by` when someone is signed in.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`DataError`]; the collection is unchanged.
    pub async fn add_item(&self, mut payload: NewItem, identity: Option<&Identity>) -> Result<Item, DataError> {
        payload.stamp_creator(identity);
        let row = self.table.insert(&payload).await?;
        self.state.apply(|s| {
            s.items.retain(|item| item.id != row.id);
            s.items.insert(0, row.clone());
        });
        Ok(row)
    }

    /// Mark the item resolved. Safe to repeat.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`DataError`]; the local flag is only set once
    /// the backend confirms.
    pub async fn mark_as_found(&self, item_id: &str) -> Result<(), DataError> {
        let row = self.table.mark_resolved(item_id).await?;
        self.state.apply(|s| {
            if let Some(item) = s.items.iter_mut().find(|item| item.id == item_id) {
                item.resolved = true;
            }
        });
        if !row.resolved {
            leptos::logging::warn!("backend returned unresolved row for {item_id}");
        }
        Ok(())
    }
}
