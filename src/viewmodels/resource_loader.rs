// ============================================================================
// RESOURCE LOADER - fetch -> loading -> loaded | failed, newest request wins
// ============================================================================
// Every load takes a ticket from a monotonically increasing generation.
// A response whose ticket is no longer the newest is dropped, so a slow
// answer for an old filter can never overwrite a fresher one.
// ============================================================================

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use crate::services::ApiError;
use crate::state::ReactiveState;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

/// What a list page renders
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    Loading,
    /// Inline error with a retry affordance
    Error(String),
    Empty(&'static str),
    Rows(Vec<T>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct ResourceLoader<T> {
    state: ReactiveState<LoadState<T>>,
    generation: Rc<Cell<u64>>,
}

impl<T> Clone for ResourceLoader<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            generation: self.generation.clone(),
        }
    }
}

impl<T: Clone + 'static> ResourceLoader<T> {
    pub fn new() -> Self {
        Self {
            state: ReactiveState::new(LoadState::Idle),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Start a request: supersedes anything in flight
    pub fn begin(&self) -> LoadTicket {
        let ticket = self.bump();
        self.state.set(LoadState::Loading);
        LoadTicket(ticket)
    }

    /// Apply a result if `ticket` is still the newest. Returns whether it was applied.
    pub fn settle(&self, ticket: LoadTicket, result: Result<T, ApiError>) -> bool {
        if ticket.0 != self.generation.get() {
            log::debug!(
                "⏭️ Dropping stale response (ticket {}, current {})",
                ticket.0,
                self.generation.get()
            );
            return false;
        }

        match result {
            Ok(value) => self.state.set(LoadState::Loaded(value)),
            Err(e) => {
                log::warn!("⚠️ Load failed: {}", e);
                self.state.set(LoadState::Failed(e.to_string()));
            }
        }
        true
    }

    pub async fn load<F>(&self, fetch: F) -> bool
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let ticket = self.begin();
        let result = fetch.await;
        self.settle(ticket, result)
    }

    /// Set a value directly and drop whatever is in flight
    pub fn set_loaded(&self, value: T) {
        self.bump();
        self.state.set(LoadState::Loaded(value));
    }

    /// Fail without a request, e.g. when a prerequisite load failed
    pub fn fail(&self, message: impl Into<String>) {
        self.bump();
        self.state.set(LoadState::Failed(message.into()));
    }

    /// Edit loaded data in place. No-op (false) unless loaded.
    pub fn modify<F>(&self, edit: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let loaded = self.state.with(|state| matches!(state, LoadState::Loaded(_)));
        if loaded {
            self.state.update(|state| {
                if let LoadState::Loaded(value) = state {
                    edit(value);
                }
            });
        }
        loaded
    }

    pub fn reset(&self) {
        self.bump();
        self.state.set(LoadState::Idle);
    }

    pub fn state(&self) -> LoadState<T> {
        self.state.get()
    }

    pub fn data(&self) -> Option<T> {
        self.state.with(|state| match state {
            LoadState::Loaded(value) => Some(value.clone()),
            _ => None,
        })
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|state| match state {
            LoadState::Failed(message) => Some(message.clone()),
            _ => None,
        })
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|state| matches!(state, LoadState::Loading))
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.state.subscribe(callback);
    }

    fn bump(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }
}

impl<T: Clone + 'static> Default for ResourceLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> ResourceLoader<Vec<T>> {
    /// Rows passing `keep`; `empty_message` when nothing is left
    pub fn list_view<P>(&self, empty_message: &'static str, keep: P) -> ListView<T>
    where
        P: Fn(&T) -> bool,
    {
        self.state.with(|state| match state {
            LoadState::Idle | LoadState::Loading => ListView::Loading,
            LoadState::Failed(message) => ListView::Error(message.clone()),
            LoadState::Loaded(rows) => {
                let rows: Vec<T> = rows.iter().filter(|row| keep(row)).cloned().collect();
                if rows.is_empty() {
                    ListView::Empty(empty_message)
                } else {
                    ListView::Rows(rows)
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.state.with(|state| match state {
            LoadState::Loaded(rows) => rows.len(),
            _ => 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn empty_success_is_an_empty_view_not_an_error() {
        let loader: ResourceLoader<Vec<u32>> = ResourceLoader::new();
        assert_eq!(loader.list_view("Nothing here", |_| true), ListView::Loading);

        block_on(loader.load(async { Ok(Vec::new()) }));
        assert_eq!(loader.list_view("Nothing here", |_| true), ListView::Empty("Nothing here"));
        assert_eq!(loader.error(), None);
    }

    #[test]
    fn failure_message_lands_in_the_error_slot() {
        let loader: ResourceLoader<Vec<u32>> = ResourceLoader::new();
        block_on(loader.load(async {
            Err(ApiError::Status {
                status: 403,
                detail: "Forbidden".into(),
            })
        }));
        assert_eq!(loader.list_view("none", |_| true), ListView::Error("Forbidden".into()));
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let loader: ResourceLoader<Vec<u32>> = ResourceLoader::new();
        let old = loader.begin();
        let new = loader.begin();

        assert!(loader.settle(new, Ok(vec![2])));
        assert!(!loader.settle(old, Ok(vec![1])));
        assert_eq!(loader.data(), Some(vec![2]));
    }

    #[test]
    fn set_loaded_supersedes_in_flight_requests() {
        let loader: ResourceLoader<Vec<u32>> = ResourceLoader::new();
        let pending = loader.begin();
        loader.set_loaded(vec![]);
        assert!(!loader.settle(pending, Ok(vec![9])));
        assert_eq!(loader.len(), 0);
    }

    #[test]
    fn filter_can_empty_the_rows() {
        let loader = ResourceLoader::new();
        loader.set_loaded(vec![1, 2, 3]);
        assert_eq!(loader.list_view("none", |n| *n > 1), ListView::Rows(vec![2, 3]));
        assert_eq!(loader.list_view("none", |n| *n > 5), ListView::Empty("none"));
    }
}
