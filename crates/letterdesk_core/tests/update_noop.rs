use letterdesk_core::{update, AppState, Field, Flow, Msg};
use pretty_assertions::assert_eq;

#[test]
fn foreign_field_edit_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::FieldEdited {
            flow: Flow::Proposal,
            field: Field::Position,
            value: "Engineer".to_string(),
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn acknowledging_without_notifications_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::NotificationsShown {
            flow: Flow::CoverLetter,
            count: 3,
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
