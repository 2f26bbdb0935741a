//! Store operations. Each takes any SQLite executor, so callers can run them
//! on the pool directly or inside a transaction (`&mut *tx`).

pub mod milestones;
pub mod profile;
pub mod quiz_history;
pub mod words;

pub use milestones::*;
pub use profile::*;
pub use quiz_history::*;
pub use words::*;
