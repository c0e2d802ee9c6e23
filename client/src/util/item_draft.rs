//! Editable draft behind the "Post Item" form.

#[cfg(test)]
#[path = "item_draft_test.rs"]
mod item_draft_test;

use crate::net::types::{ItemKind, NewItem};

pub const EMPTY_DRAFT_MESSAGE: &str = "Add a title or a description.";

/// Raw form field values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub kind: ItemKind,
    pub title: String,
    pub description: String,
    pub location: String,
    pub contact: String,
    pub image_url: String,
}

impl ItemDraft {
    /// Trim fields and build the insert payload. Blank optional fields are
    /// omitted; `created_by` is left for the store to stamp.
    ///
    /// # Errors
    ///
    /// Returns [`EMPTY_DRAFT_MESSAGE`] when both title and description are blank.
    pub fn to_new_item(&self) -> Result<NewItem, &'static str> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() && description.is_empty() {
            return Err(EMPTY_DRAFT_MESSAGE);
        }
        Ok(NewItem {
            kind: self.kind,
            title: title.to_owned(),
            description: description.to_owned(),
            location: non_empty(&self.location),
            contact: non_empty(&self.contact),
            image_url: non_empty(&self.image_url),
            created_by: None,
        })
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
