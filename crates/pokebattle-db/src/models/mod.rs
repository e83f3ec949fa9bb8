//! Database models for persistent storage.

mod battle;
mod sequence;

pub use battle::*;
pub use sequence::*;
