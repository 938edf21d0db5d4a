//! Repository walking

pub mod walker;

pub use walker::{walk, TreeWalker};
