//! Transient snackbar notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages report outcomes ("Login successful!") and the REST client reports
//! forced logouts through one [`Notifier`]; the `Snackbar` component renders
//! the current message and hides it after [`AUTO_HIDE_MS`].

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use leptos::prelude::*;

/// How long a notification stays visible.
pub const AUTO_HIDE_MS: u32 = 6_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl Severity {
    /// CSS modifier class for the snackbar.
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "snackbar snackbar--success",
            Self::Info => "snackbar snackbar--info",
            Self::Warning => "snackbar snackbar--warning",
            Self::Error => "snackbar snackbar--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// At most one visible notification; a new one replaces the old.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotifyState {
    pub current: Option<Notification>,
    next_id: u64,
}

impl NotifyState {
    /// Show `message`, returning its id for a later [`Self::dismiss`].
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.current = Some(Notification {
            id: self.next_id,
            message: message.into(),
            severity,
        });
        self.next_id
    }

    /// Hide notification `id` if it is still the visible one.
    pub fn dismiss(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
        }
    }
}

/// Handle used to raise notifications from anywhere in the tree.
#[derive(Clone, Copy, Debug)]
pub struct Notifier {
    state: RwSignal<NotifyState>,
}

impl Notifier {
    pub fn provide() -> Self {
        let notifier = Self {
            state: RwSignal::new(NotifyState::default()),
        };
        provide_context(notifier);
        notifier
    }

    pub fn expect() -> Self {
        expect_context::<Self>()
    }

    pub fn state(self) -> RwSignal<NotifyState> {
        self.state
    }

    pub fn show(self, message: impl Into<String>, severity: Severity) {
        let mut id = 0;
        self.state.update(|s| id = s.show(message, severity));
        self.schedule_hide(id);
    }

    pub fn success(self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn warning(self, message: impl Into<String>) {
        self.show(message, Severity::Warning);
    }

    pub fn error(self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    pub fn dismiss(self, id: u64) {
        self.state.update(|s| s.dismiss(id));
    }

    fn schedule_hide(self, id: u64) {
        #[cfg(feature = "csr")]
        gloo_timers::callback::Timeout::new(AUTO_HIDE_MS, move || self.dismiss(id)).forget();
        #[cfg(not(feature = "csr"))]
        let _ = id;
    }
}
