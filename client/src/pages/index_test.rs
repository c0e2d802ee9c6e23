use super::*;
use crate::net::types::ItemKind;

fn saved_item() -> Item {
    Item {
        id: "42".to_owned(),
        kind: ItemKind::Lost,
        title: "Lost Item".to_owned(),
        description: "blue umbrella".to_owned(),
        location: None,
        contact: None,
        image_url: None,
        created_at: None,
        resolved: false,
        created_by: Some("u1".to_owned()),
    }
}

fn saving_form() -> PostFormState {
    let mut form = PostFormState::default();
    form.show();
    form.begin_save();
    form
}

#[test]
fn post_form_starts_closed() {
    let form = PostFormState::default();
    assert!(!form.open);
    assert!(!form.saving);
    assert!(form.error.is_none());
}

#[test]
fn successful_add_collapses_form() {
    let mut form = saving_form();
    assert!(form.saving);

    form.finish_save(&Ok(saved_item()));
    assert!(!form.open);
    assert!(!form.saving);
    assert!(form.error.is_none());
}

#[test]
fn failed_add_keeps_form_open_with_message() {
    let mut form = saving_form();

    form.finish_save(&Err(DataError::Rejected("permission denied for table items".to_owned())));
    assert!(form.open);
    assert!(!form.saving);
    assert_eq!(form.error.as_deref(), Some("permission denied for table items"));
}

#[test]
fn closing_and_reopening_clears_stale_error() {
    let mut form = saving_form();
    form.finish_save(&Err(DataError::Unavailable));
    assert!(form.error.is_some());

    form.toggle();
    assert!(!form.open);
    form.toggle();
    assert!(form.open);
    assert!(form.error.is_none());
}

#[test]
fn hero_button_on_open_form_keeps_error_visible() {
    let mut form = saving_form();
    form.finish_save(&Err(DataError::Unavailable));

    form.show();
    assert!(form.open);
    assert_eq!(form.error.as_deref(), Some("data backend not available"));
}

#[test]
fn retry_clears_previous_error() {
    let mut form = saving_form();
    form.finish_save(&Err(DataError::Unavailable));

    form.begin_save();
    assert!(form.saving);
    assert!(form.error.is_none());
}
