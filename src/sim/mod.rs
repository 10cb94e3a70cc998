pub mod driver;
pub mod source;

pub use driver::Sim;
pub use source::{EventSource, RandomEvents, RandomEventsConfig, ScriptedEvents};
