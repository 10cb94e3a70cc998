pub mod lru;

pub use lru::{LruTrace, Outcome, PageId, PageStep};
