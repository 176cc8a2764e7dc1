//! Training dataset loading and splitting.

pub mod loader;
pub mod split;
