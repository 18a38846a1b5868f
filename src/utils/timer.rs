// ============================================================================
// TIMER - deferred callbacks (notification expiry)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type Task = Box<dyn FnOnce()>;

/// Runs a task once after `delay_ms`
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Task);
}

/// setTimeout through gloo-timers
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

#[cfg(target_arch = "wasm32")]
impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        // The timeout must outlive this call; it fires once and is then released by the browser
        gloo_timers::callback::Timeout::new(delay_ms, task).forget();
    }
}

/// Scheduler driven by an explicit clock, for hosts without a browser event loop
#[derive(Clone, Default)]
pub struct ManualScheduler {
    now_ms: Rc<Cell<u64>>,
    pending: Rc<RefCell<Vec<(u64, Task)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Move the clock forward and run every task that became due, oldest deadline first
    pub fn advance(&self, ms: u64) {
        let now = self.now_ms.get() + ms;
        self.now_ms.set(now);

        let mut due = {
            let mut pending = self.pending.borrow_mut();
            let (due, waiting): (Vec<_>, Vec<_>) =
                pending.drain(..).partition(|(deadline, _)| *deadline <= now);
            *pending = waiting;
            due
        };
        due.sort_by_key(|(deadline, _)| *deadline);

        // Tasks run with no borrow held so they can schedule again
        for (_, task) in due {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) {
        let deadline = self.now_ms.get() + u64::from(delay_ms);
        self.pending.borrow_mut().push((deadline, task));
    }
}
