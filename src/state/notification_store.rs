// ============================================================================
// NOTIFICATION STORE - short-lived toasts
// ============================================================================

use std::rc::Rc;

use crate::models::{Notification, Severity};
use crate::state::reactivity::ReactiveState;
use crate::utils::timer::Scheduler;

#[derive(Clone)]
pub struct NotificationStore {
    items: ReactiveState<Vec<Notification>>,
    scheduler: Rc<dyn Scheduler>,
    duration_ms: u32,
}

impl NotificationStore {
    pub fn new(scheduler: Rc<dyn Scheduler>, duration_ms: u32) -> Self {
        Self {
            items: ReactiveState::new(Vec::new()),
            scheduler,
            duration_ms,
        }
    }

    /// Append a notification and schedule its expiry. Returns its id.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> String {
        let message = message.into();
        let id = self.fresh_id();

        log::info!("🔔 [{:?}] {}", severity, message);
        self.items.update(|items| {
            items.push(Notification {
                id: id.clone(),
                message,
                severity,
            })
        });

        let items = self.items.clone();
        let expired = id.clone();
        self.scheduler.schedule(
            self.duration_ms,
            Box::new(move || {
                let present = items.with(|list| list.iter().any(|n| n.id == expired));
                if present {
                    items.update(|list| list.retain(|n| n.id != expired));
                }
            }),
        );

        id
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> String {
        self.show(message, Severity::Info)
    }

    /// Remove now. Returns false when the id is unknown (already expired).
    pub fn dismiss(&self, id: &str) -> bool {
        let present = self.items.with(|list| list.iter().any(|n| n.id == id));
        if present {
            self.items.update(|list| list.retain(|n| n.id != id));
        }
        present
    }

    /// Oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.items.get()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.items.subscribe(callback);
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().simple().to_string();
            let taken = self.items.with(|list| list.iter().any(|n| n.id == id));
            if !taken {
                return id;
            }
        }
    }
}
