//! Software [`GpuContext`] that rasterizes onto a [`Surface2d`].
//!
//! Shader "compilation" is a structural check: the source must define
//! `main`, and its `attribute`/`uniform` declarations become the program's
//! locations after linking. Fragment color is whatever the color uniform
//! holds. Live shaders, programs and buffers are tracked so leaks show up
//! in tests.

use std::collections::HashMap;

use crate::core::RenderError;
use crate::gpu::{BufferId, GpuContext, ProgramId, ShaderId, ShaderStage, UniformLocation};
use crate::layout::Rect;
use crate::palette::Rgb;
use crate::surface::Surface2d;

#[derive(Debug, Clone)]
struct Shader {
    stage: ShaderStage,
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Debug, Clone)]
struct Program {
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

pub struct SoftwareGpu<T: Surface2d> {
    target: T,
    next_id: u32,
    shaders: HashMap<u32, Shader>,
    programs: HashMap<u32, Program>,
    buffers: HashMap<u32, Vec<f32>>,
    current_program: Option<u32>,
    bound_buffer: Option<u32>,
    color: [f32; 4],
    viewport: (u32, u32),
    buffer_limit: Option<usize>,
}

impl<T: Surface2d> SoftwareGpu<T> {
    pub fn new(target: T) -> Self {
        let viewport = target.size();
        Self {
            target,
            next_id: 0,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            buffers: HashMap::new(),
            current_program: None,
            bound_buffer: None,
            color: [0.0, 0.0, 0.0, 1.0],
            viewport,
            buffer_limit: None,
        }
    }

    /// Cap on simultaneously live buffers; `create_buffer` fails past it.
    pub fn with_buffer_limit(mut self, limit: usize) -> Self {
        self.buffer_limit = Some(limit);
        self
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn live_shaders(&self) -> usize {
        self.shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn to_pixels(&self, x: f32, y: f32) -> (f32, f32) {
        let (w, h) = self.viewport;
        ((x + 1.0) * 0.5 * w as f32, (1.0 - y) * 0.5 * h as f32)
    }

    fn fill_triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), color: Rgb) {
        let (w, h) = self.target.size();
        let min_x = a.0.min(b.0).min(c.0).floor().max(0.0) as u32;
        let min_y = a.1.min(b.1).min(c.1).floor().max(0.0) as u32;
        let max_x = (a.0.max(b.0).max(c.0).ceil().max(0.0) as u32).min(w);
        let max_y = (a.1.max(b.1).max(c.1).ceil().max(0.0) as u32).min(h);

        let area = edge(a, b, c);
        if area == 0.0 {
            return;
        }
        for py in min_y..max_y {
            for px in min_x..max_x {
                let p = (px as f32 + 0.5, py as f32 + 0.5);
                let w0 = edge(b, c, p) / area;
                let w1 = edge(c, a, p) / area;
                let w2 = edge(a, b, p) / area;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.target.fill_rect(Rect::new(px, py, 1, 1), color);
                }
            }
        }
    }
}

/// Twice the signed area of `(a, b, p)`.
fn edge(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

/// Names declared as `<qualifier> <type> <name>;`.
fn declared(source: &str, qualifier: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let mut words = line.trim().trim_end_matches(';').split_whitespace();
            if words.next()? != qualifier {
                return None;
            }
            let _ty = words.next()?;
            words.next().map(str::to_string)
        })
        .collect()
}

impl<T: Surface2d> GpuContext for SoftwareGpu<T> {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, RenderError> {
        if !source.contains("void main") {
            return Err(RenderError::ShaderCompile {
                stage: stage.as_str(),
                log: "missing entry point `main`".to_string(),
            });
        }
        let attributes = declared(source, "attribute");
        if stage == ShaderStage::Fragment && !attributes.is_empty() {
            return Err(RenderError::ShaderCompile {
                stage: stage.as_str(),
                log: "attributes are not allowed in fragment shaders".to_string(),
            });
        }
        let shader = Shader {
            stage,
            attributes,
            uniforms: declared(source, "uniform"),
        };
        let id = self.alloc_id();
        self.shaders.insert(id, shader);
        Ok(ShaderId(id))
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.shaders.remove(&shader.0);
    }

    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, RenderError> {
        let (Some(vs), Some(fs)) = (self.shaders.get(&vertex.0), self.shaders.get(&fragment.0)) else {
            return Err(RenderError::ProgramLink("unknown shader handle".to_string()));
        };
        if vs.stage != ShaderStage::Vertex || fs.stage != ShaderStage::Fragment {
            return Err(RenderError::ProgramLink("shader stages do not match".to_string()));
        }
        let mut uniforms = vs.uniforms.clone();
        uniforms.extend(fs.uniforms.iter().cloned());
        let program = Program {
            attributes: vs.attributes.clone(),
            uniforms,
        };
        let id = self.alloc_id();
        self.programs.insert(id, program);
        Ok(ProgramId(id))
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.programs.remove(&program.0);
        if self.current_program == Some(program.0) {
            self.current_program = None;
        }
    }

    fn use_program(&mut self, program: ProgramId) {
        if self.programs.contains_key(&program.0) {
            self.current_program = Some(program.0);
        }
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        let program = self.programs.get(&program.0)?;
        program
            .attributes
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let program = self.programs.get(&program.0)?;
        program
            .uniforms
            .iter()
            .position(|u| u == name)
            .map(|i| UniformLocation(i as u32))
    }

    fn create_buffer(&mut self) -> Option<BufferId> {
        if self.buffer_limit.is_some_and(|limit| self.buffers.len() >= limit) {
            return None;
        }
        let id = self.alloc_id();
        self.buffers.insert(id, Vec::new());
        Some(BufferId(id))
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer.0);
        if self.bound_buffer == Some(buffer.0) {
            self.bound_buffer = None;
        }
    }

    fn upload_vertices(&mut self, buffer: BufferId, _attrib: u32, vertices: &[f32]) {
        if let Some(data) = self.buffers.get_mut(&buffer.0) {
            data.clear();
            data.extend_from_slice(vertices);
            self.bound_buffer = Some(buffer.0);
        }
    }

    fn set_uniform_color(&mut self, _location: UniformLocation, rgba: [f32; 4]) {
        self.color = rgba;
    }

    fn drawable_size(&self) -> (u32, u32) {
        self.target.size()
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn clear(&mut self, rgba: [f32; 4]) {
        self.target.clear(Rgb::from_unit(rgba));
    }

    fn draw_triangles(&mut self, vertex_count: u32) -> Result<(), RenderError> {
        if self.current_program.is_none() {
            return Err(RenderError::Backend("draw without a program".to_string()));
        }
        let Some(data) = self.bound_buffer.and_then(|id| self.buffers.get(&id)) else {
            return Err(RenderError::Backend("draw without a vertex buffer".to_string()));
        };
        let needed = vertex_count as usize * 2;
        if data.len() < needed {
            return Err(RenderError::Backend(format!(
                "draw of {vertex_count} vertices from a buffer holding {}",
                data.len() / 2
            )));
        }

        let points: Vec<(f32, f32)> = data[..needed]
            .chunks_exact(2)
            .map(|v| self.to_pixels(v[0], v[1]))
            .collect();
        let color = Rgb::from_unit(self.color);
        for tri in points.chunks_exact(3) {
            self.fill_triangle(tri[0], tri[1], tri[2], color);
        }
        Ok(())
    }
}
