//! Renderer variants for the engine's [`Renderer`](blockfall_core::Renderer) seam.
//!
//! - [`SurfaceRenderer`]: paints rectangles onto any [`Surface2d`]
//! - [`RasterRenderer`]: shader pipeline over any [`GpuContext`]
//! - [`SoftwareGpu`]: a `GpuContext` that rasterizes onto a `Surface2d`
//! - [`Pixmap`]: in-memory surface for headless use and tests
//!
//! Both variants share [`layout`] and [`palette`], so the same snapshot
//! produces the same picture through either path.

pub mod gpu;
pub mod layout;
pub mod palette;
pub mod pixmap;
pub mod raster;
pub mod select;
pub mod software;
pub mod surface;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use gpu::{BufferId, GpuContext, ProgramId, ShaderId, ShaderStage, UniformLocation};
pub use layout::{BoardLayout, Rect};
pub use palette::{color_for, ghost_color, Rgb, BACKGROUND, WELL};
pub use pixmap::Pixmap;
pub use raster::{RasterRenderer, FRAGMENT_SHADER, VERTEX_SHADER};
pub use select::{select_renderer, RendererKind};
pub use software::SoftwareGpu;
pub use surface::{Surface2d, SurfaceRenderer};
