//! The displaced-plane scene pass.
//!
//! One subdivided plane, tessellated finely enough that the vertex
//! shader's noise displacement reads as rolling lava. The mesh is built
//! once on the CPU and never touched again; everything that animates goes
//! through the uniform block.

use bytemuck::{Pod, Zeroable};
use palette_table::Palette;
use wgpu::util::DeviceExt;

use crate::uniforms::PlaneUniforms;

/// Plane footprint in world units.
pub const PLANE_WIDTH: f32 = 5.0;
pub const PLANE_HEIGHT: f32 = 2.5;
/// Subdivisions along each axis.
pub const PLANE_SEGMENTS: u32 = 300;

const PLANE_SHADER: &str = include_str!("../shaders/plane.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Builds a `width` × `height` plane in the XY plane, centred at the
/// origin, with `segments`² quads and u32 indices.
pub fn plane_mesh(width: f32, height: f32, segments: u32) -> (Vec<Vertex>, Vec<u32>) {
    let verts_per_side = segments + 1;
    let mut vertices = Vec::with_capacity((verts_per_side * verts_per_side) as usize);
    for row in 0..verts_per_side {
        for col in 0..verts_per_side {
            let u = col as f32 / segments as f32;
            let v = row as f32 / segments as f32;
            vertices.push(Vertex {
                position: [(u - 0.5) * width, (v - 0.5) * height, 0.0],
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    for row in 0..segments {
        for col in 0..segments {
            let a = row * verts_per_side + col;
            let b = a + 1;
            let c = a + verts_per_side;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    (vertices, indices)
}

/// Pipeline, mesh buffers, and uniform state for the base render pass.
pub struct ScenePass {
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: Option<wgpu::RenderPipeline>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pub uniforms: PlaneUniforms,
    /// Draw with the line pipeline when available.
    pub wireframe: bool,
}

impl ScenePass {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        line_polygons: bool,
        palette: &Palette,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("plane shader"),
            source: wgpu::ShaderSource::Wgsl(PLANE_SHADER.into()),
        });

        let uniforms = PlaneUniforms::new(palette);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("plane uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("plane uniform bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("plane pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let build_pipeline = |polygon_mode: wgpu::PolygonMode, label: &str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x2,
                        ],
                    }],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    // Double-sided: the displaced sheet is visible from behind.
                    cull_mode: None,
                    polygon_mode,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: Default::default(),
                multiview: None,
                cache: None,
            })
        };

        let fill_pipeline = build_pipeline(wgpu::PolygonMode::Fill, "plane fill pipeline");
        let line_pipeline =
            line_polygons.then(|| build_pipeline(wgpu::PolygonMode::Line, "plane line pipeline"));

        let (vertices, indices) = plane_mesh(PLANE_WIDTH, PLANE_HEIGHT, PLANE_SEGMENTS);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            fill_pipeline,
            line_pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            uniform_buffer,
            bind_group,
            uniforms,
            wireframe: false,
        }
    }

    /// Mirrors the CPU uniform block into the GPU buffer.
    pub fn prepare(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }

    /// Records the base pass into `view`, clearing it first.
    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });

        let pipeline = match (&self.line_pipeline, self.wireframe) {
            (Some(line), true) => line,
            _ => &self.fill_pipeline,
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_has_expected_counts() {
        let (vertices, indices) = plane_mesh(PLANE_WIDTH, PLANE_HEIGHT, PLANE_SEGMENTS);
        let side = (PLANE_SEGMENTS + 1) as usize;
        assert_eq!(vertices.len(), side * side);
        assert_eq!(indices.len(), (PLANE_SEGMENTS * PLANE_SEGMENTS * 6) as usize);
    }

    #[test]
    fn mesh_is_centred_with_unit_uvs() {
        let (vertices, indices) = plane_mesh(2.0, 1.0, 4);
        for vertex in &vertices {
            assert!(vertex.position[0].abs() <= 1.0 + 1e-6);
            assert!(vertex.position[1].abs() <= 0.5 + 1e-6);
            assert_eq!(vertex.position[2], 0.0);
            assert!((0.0..=1.0).contains(&vertex.uv[0]));
            assert!((0.0..=1.0).contains(&vertex.uv[1]));
        }
        let max_index = *indices.iter().max().unwrap() as usize;
        assert!(max_index < vertices.len());
    }

    #[test]
    fn corner_vertices_span_the_footprint() {
        let (vertices, _) = plane_mesh(5.0, 2.5, 2);
        let first = vertices.first().unwrap();
        let last = vertices.last().unwrap();
        assert_eq!(first.position[0], -2.5);
        assert_eq!(first.position[1], -1.25);
        assert_eq!(last.position[0], 2.5);
        assert_eq!(last.position[1], 1.25);
    }
}
