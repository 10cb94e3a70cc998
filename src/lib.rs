pub mod core;
pub mod memory;
pub mod scheduler;
pub mod sim;
pub mod sync;

pub use crate::core::{Result, SimError};
pub use scheduler::DiskScheduler;
pub use sim::Sim;
pub use sync::AccessArbiter;
