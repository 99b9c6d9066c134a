//! Accelerated graphics context seam.
//!
//! A deliberately small slice of a WebGL-style API: shaders, one program,
//! one vertex buffer, one color uniform, triangle lists.

use crate::core::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

pub trait GpuContext {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, RenderError>;
    fn delete_shader(&mut self, shader: ShaderId);

    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, RenderError>;
    fn delete_program(&mut self, program: ProgramId);
    fn use_program(&mut self, program: ProgramId);

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    fn create_buffer(&mut self) -> Option<BufferId>;
    fn delete_buffer(&mut self, buffer: BufferId);

    /// Bind `buffer`, replace its contents with `vertices` (x, y pairs in clip
    /// space) and point attribute `attrib` at it.
    fn upload_vertices(&mut self, buffer: BufferId, attrib: u32, vertices: &[f32]);

    fn set_uniform_color(&mut self, location: UniformLocation, rgba: [f32; 4]);

    /// Size in pixels of the default framebuffer.
    fn drawable_size(&self) -> (u32, u32);

    fn set_viewport(&mut self, width: u32, height: u32);
    fn clear(&mut self, rgba: [f32; 4]);

    /// Draw `vertex_count` vertices from the bound buffer as triangles.
    fn draw_triangles(&mut self, vertex_count: u32) -> Result<(), RenderError>;
}

impl<G: GpuContext + ?Sized> GpuContext for &mut G {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, RenderError> {
        (**self).compile_shader(stage, source)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        (**self).delete_shader(shader)
    }

    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, RenderError> {
        (**self).link_program(vertex, fragment)
    }

    fn delete_program(&mut self, program: ProgramId) {
        (**self).delete_program(program)
    }

    fn use_program(&mut self, program: ProgramId) {
        (**self).use_program(program)
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        (**self).attrib_location(program, name)
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        (**self).uniform_location(program, name)
    }

    fn create_buffer(&mut self) -> Option<BufferId> {
        (**self).create_buffer()
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        (**self).delete_buffer(buffer)
    }

    fn upload_vertices(&mut self, buffer: BufferId, attrib: u32, vertices: &[f32]) {
        (**self).upload_vertices(buffer, attrib, vertices)
    }

    fn set_uniform_color(&mut self, location: UniformLocation, rgba: [f32; 4]) {
        (**self).set_uniform_color(location, rgba)
    }

    fn drawable_size(&self) -> (u32, u32) {
        (**self).drawable_size()
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        (**self).set_viewport(width, height)
    }

    fn clear(&mut self, rgba: [f32; 4]) {
        (**self).clear(rgba)
    }

    fn draw_triangles(&mut self, vertex_count: u32) -> Result<(), RenderError> {
        (**self).draw_triangles(vertex_count)
    }
}
