//! Shared test utilities for the dirmirror workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`trees`]: [`TestTrees`] builder for a temporary source/replica pair

pub mod trees;

pub use trees::TestTrees;
