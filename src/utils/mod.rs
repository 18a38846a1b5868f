// Shared utilities

pub mod constants;
pub mod storage;
pub mod timer;

pub use constants::*;
pub use storage::{KeyValueStorage, MemoryStorage};
pub use timer::{ManualScheduler, Scheduler};

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
#[cfg(target_arch = "wasm32")]
pub use timer::BrowserScheduler;
