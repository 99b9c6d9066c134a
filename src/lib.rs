//! Blockfall: a falling-block puzzle engine (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this
//! package re-exports them and owns the application configuration.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_presence as presence;
pub use blockfall_render as render;
pub use blockfall_term as term;
pub use blockfall_types as types;
