//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework. [`InputMapper`] turns press/hold/release
//! of the five host controls into engine intents with DAS/ARR repeat, and
//! [`keys`] maps `crossterm` key events onto those controls.

pub mod keys;
pub mod mapper;

pub use blockfall_types as types;

pub use keys::{command_for_key, control_for_key, should_quit, HostCommand};
pub use mapper::{Control, ControlInputs, InputMapper, Intents, DEFAULT_HOLD_TIMEOUT_MS};
