use super::*;

#[test]
fn notify_state_starts_hidden() {
    assert!(NotifyState::default().current.is_none());
}

#[test]
fn show_sets_current_with_increasing_ids() {
    let mut state = NotifyState::default();
    let first = state.show("one", Severity::Info);
    let second = state.show("two", Severity::Error);
    assert!(second > first);
    let current = state.current.unwrap();
    assert_eq!(current.message, "two");
    assert_eq!(current.severity, Severity::Error);
}

#[test]
fn dismiss_hides_matching_notification() {
    let mut state = NotifyState::default();
    let id = state.show("saved", Severity::Success);
    state.dismiss(id);
    assert!(state.current.is_none());
}

#[test]
fn stale_dismiss_keeps_newer_notification() {
    let mut state = NotifyState::default();
    let old = state.show("old", Severity::Info);
    state.show("new", Severity::Warning);
    state.dismiss(old);
    assert_eq!(state.current.map(|n| n.message), Some("new".to_owned()));
}

#[test]
fn severity_default_is_info() {
    assert_eq!(Severity::default(), Severity::Info);
    assert_eq!(Severity::Error.class(), "snackbar snackbar--error");
}
