//! Rasterized renderer over a [`GpuContext`].
//!
//! Construction acquires a linked shader program, the `a_position` attribute,
//! the `u_color` uniform and one vertex buffer. Whatever was acquired before a
//! failure is released before the error is returned. A constructed renderer
//! releases everything when dropped.
//!
//! Each frame uploads two clip-space triangles per filled cell, sets the color
//! uniform and draws.

use tracing::{debug, info};

use crate::core::{GameSnapshot, RenderError, Renderer, Viewport};
use crate::gpu::{BufferId, GpuContext, ProgramId, ShaderId, ShaderStage, UniformLocation};
use crate::layout::{BoardLayout, Rect};
use crate::palette::{color_for, ghost_color, Rgb, BACKGROUND, WELL};
use crate::surface::effective_viewport;

pub const POSITION_ATTRIBUTE: &str = "a_position";
pub const COLOR_UNIFORM: &str = "u_color";

pub const VERTEX_SHADER: &str = "\
attribute vec2 a_position;
void main() {
    gl_Position = vec4(a_position, 0.0, 1.0);
}
";

pub const FRAGMENT_SHADER: &str = "\
precision mediump float;
uniform vec4 u_color;
void main() {
    gl_FragColor = u_color;
}
";

/// Handles held by a renderer; any subset may be live during construction.
#[derive(Debug, Default)]
struct Resources {
    vertex: Option<ShaderId>,
    fragment: Option<ShaderId>,
    program: Option<ProgramId>,
    buffer: Option<BufferId>,
}

impl Resources {
    fn release<G: GpuContext>(&mut self, gpu: &mut G) {
        if let Some(buffer) = self.buffer.take() {
            gpu.delete_buffer(buffer);
        }
        if let Some(program) = self.program.take() {
            gpu.delete_program(program);
        }
        if let Some(shader) = self.fragment.take() {
            gpu.delete_shader(shader);
        }
        if let Some(shader) = self.vertex.take() {
            gpu.delete_shader(shader);
        }
    }
}

pub struct RasterRenderer<G: GpuContext> {
    gpu: G,
    resources: Resources,
    program: ProgramId,
    buffer: BufferId,
    position: u32,
    color: UniformLocation,
    vertices: Vec<f32>,
}

impl<G: GpuContext> RasterRenderer<G> {
    pub fn new(gpu: G) -> Result<Self, RenderError> {
        Self::with_shaders(gpu, VERTEX_SHADER, FRAGMENT_SHADER)
    }

    pub fn with_shaders(mut gpu: G, vertex_src: &str, fragment_src: &str) -> Result<Self, RenderError> {
        let mut resources = Resources::default();
        match acquire(&mut gpu, &mut resources, vertex_src, fragment_src) {
            Ok((program, buffer, position, color)) => {
                info!(program = program.0, buffer = buffer.0, "raster pipeline ready");
                Ok(Self {
                    gpu,
                    resources,
                    program,
                    buffer,
                    position,
                    color,
                    vertices: Vec::with_capacity(12),
                })
            }
            Err(err) => {
                resources.release(&mut gpu);
                Err(err)
            }
        }
    }

    pub fn gpu(&self) -> &G {
        &self.gpu
    }

    fn draw_rect(&mut self, rect: Rect, viewport: Viewport, color: Rgb) -> Result<(), RenderError> {
        self.vertices.clear();
        push_rect_triangles(&mut self.vertices, rect, viewport);
        self.gpu
            .upload_vertices(self.buffer, self.position, &self.vertices);
        self.gpu.set_uniform_color(self.color, color.to_unit());
        self.gpu.draw_triangles(6)
    }
}

fn acquire<G: GpuContext>(
    gpu: &mut G,
    res: &mut Resources,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<(ProgramId, BufferId, u32, UniformLocation), RenderError> {
    let vertex = gpu.compile_shader(ShaderStage::Vertex, vertex_src)?;
    res.vertex = Some(vertex);
    let fragment = gpu.compile_shader(ShaderStage::Fragment, fragment_src)?;
    res.fragment = Some(fragment);
    let program = gpu.link_program(vertex, fragment)?;
    res.program = Some(program);

    let position = gpu
        .attrib_location(program, POSITION_ATTRIBUTE)
        .ok_or(RenderError::MissingAttribute(POSITION_ATTRIBUTE))?;
    let color = gpu
        .uniform_location(program, COLOR_UNIFORM)
        .ok_or(RenderError::MissingUniform(COLOR_UNIFORM))?;

    let buffer = gpu.create_buffer().ok_or(RenderError::BufferAllocation)?;
    res.buffer = Some(buffer);
    Ok((program, buffer, position, color))
}

/// Append two triangles covering `rect`, converted to clip space.
fn push_rect_triangles(out: &mut Vec<f32>, rect: Rect, viewport: Viewport) {
    let w = viewport.width.max(1) as f32;
    let h = viewport.height.max(1) as f32;
    let x0 = rect.x as f32 / w * 2.0 - 1.0;
    let x1 = (rect.x + rect.w) as f32 / w * 2.0 - 1.0;
    let y0 = 1.0 - rect.y as f32 / h * 2.0;
    let y1 = 1.0 - (rect.y + rect.h) as f32 / h * 2.0;
    out.extend_from_slice(&[x0, y0, x1, y0, x0, y1, x0, y1, x1, y0, x1, y1]);
}

impl<G: GpuContext> Renderer for RasterRenderer<G> {
    fn name(&self) -> &'static str {
        "raster"
    }

    fn render(&mut self, snapshot: &GameSnapshot, viewport: Viewport) -> Result<(), RenderError> {
        let viewport = effective_viewport(viewport, self.gpu.drawable_size());
        let layout = BoardLayout::fit(viewport);

        self.gpu.set_viewport(viewport.width, viewport.height);
        self.gpu.clear(BACKGROUND.to_unit());
        self.gpu.use_program(self.program);
        self.draw_rect(layout.well(), viewport, WELL)?;

        let mut draws = 0u32;
        for (x, y, kind) in snapshot.filled_cells() {
            if let Some(rect) = layout.cell_rect(x, y) {
                self.draw_rect(rect, viewport, color_for(kind))?;
                draws += 1;
            }
        }
        if let Some(active) = snapshot.active {
            for &(x, y) in &active.ghost {
                if let Some(rect) = layout.cell_rect(x, y) {
                    self.draw_rect(rect, viewport, ghost_color(active.kind))?;
                }
            }
            for &(x, y) in &active.cells {
                if let Some(rect) = layout.cell_rect(x, y) {
                    self.draw_rect(rect, viewport, color_for(active.kind))?;
                    draws += 1;
                }
            }
        }
        debug!(draws, "raster frame");
        Ok(())
    }
}

impl<G: GpuContext> Drop for RasterRenderer<G> {
    fn drop(&mut self) {
        self.resources.release(&mut self.gpu);
        debug!("raster pipeline released");
    }
}
