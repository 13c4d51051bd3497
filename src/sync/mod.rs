pub mod controller;
pub mod state;

pub use controller::{Intent, PollerHandle, SyncController};
pub use state::{Selection, SessionState, SyncFailure, SyncOperation, Tab};
