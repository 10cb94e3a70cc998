pub mod error;
pub mod input;
pub mod stats;

pub use error::{Result, SimError};

pub type Ticks = u64;
pub type ProcessId = String;
