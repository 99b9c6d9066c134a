//! Terminal host backend.
//!
//! Renders into a plain framebuffer that is diffed and flushed to the
//! terminal. The board itself is painted by an engine renderer through
//! [`FrameSurface`]; the HUD is drawn beside it.
//!
//! - [`fb`]: styled character framebuffer
//! - [`surface`]: `Surface2d` on a shared framebuffer (2 columns per pixel)
//! - [`hud`]: side panel and overlays
//! - [`output`]: raw-mode setup and diffed flushing via `crossterm`
//! - [`scheduler`]: frame-callback scheduler polled by the host loop

pub mod fb;
pub mod hud;
pub mod output;
pub mod scheduler;
pub mod surface;

pub use blockfall_core as core;
pub use blockfall_render as render;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use hud::{Hud, PresenceView, HUD_WIDTH};
pub use output::{encode_diff_into, encode_full_into, TerminalOutput};
pub use scheduler::FrameScheduler;
pub use surface::{shared_frame, FrameSurface, SharedFrame, COLUMNS_PER_PIXEL};
