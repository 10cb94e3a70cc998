pub mod arbiter;
pub mod event;
pub mod observer;
pub mod state;

pub use arbiter::AccessArbiter;
pub use event::{AccessEvent, AccessKind, Role, Timestamp, Transition};
pub use observer::Observer;
pub use state::{ArbiterState, ReleasePolicy, Step};
