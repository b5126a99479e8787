use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::scene::CircleCmd;

/// Per-pass inputs for [`CircleRenderer::render`].
pub(super) struct CirclePass<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
}

/// Instanced renderer for solid circles.
///
/// GPU resources are created lazily on first use and recreated if the
/// surface format changes.
#[derive(Default)]
pub(super) struct CircleRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,
    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl CircleRenderer {
    pub fn render(&mut self, mut pass: CirclePass<'_>, circles: &[CircleCmd]) {
        let instances: Vec<CircleInstance> = circles
            .iter()
            .filter(|c| c.radius > 0.0 && c.center.is_finite())
            .map(|c| CircleInstance {
                center: [c.center.x, c.center.y],
                radius: [c.radius, 0.0],
                color: c.fill.to_array(),
            })
            .collect();

        if instances.is_empty() || !pass.viewport.is_valid() {
            return;
        }

        self.ensure_pipeline(&pass);
        self.ensure_static_buffers(pass.device);
        self.ensure_bindings(pass.device);
        self.ensure_instance_capacity(pass.device, instances.len());

        let (Some(pipeline), Some(bind_group), Some(ubo), Some(vbo), Some(ibo), Some(inst)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.viewport_ubo.as_ref(),
            self.quad_vbo.as_ref(),
            self.quad_ibo.as_ref(),
            self.instance_vbo.as_ref(),
        ) else {
            return;
        };

        pass.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                size: [pass.viewport.width, pass.viewport.height],
                _pad: [0.0; 2],
            }),
        );
        pass.queue.write_buffer(inst, 0, bytemuck::cast_slice(&instances));

        let mut rpass = pass.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tripe circle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: pass.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_vertex_buffer(1, inst.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..instances.len() as u32);
    }

    fn ensure_pipeline(&mut self, pass: &CirclePass<'_>) {
        if self.pipeline_format == Some(pass.surface_format) && self.pipeline.is_some() {
            return;
        }

        let device = pass.device;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tripe circle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/circle.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tripe circle bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ViewportUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tripe circle pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tripe circle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), CircleInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: pass.surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("circle pipeline built for {:?}", pass.surface_format);

        self.pipeline_format = Some(pass.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, device: &wgpu::Device) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tripe circle viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tripe circle bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, device: &wgpu::Device) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tripe circle quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tripe circle quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_instance_capacity(&mut self, device: &wgpu::Device, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(16);
        self.instance_vbo = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tripe circle instance vbo"),
            size: (new_cap * std::mem::size_of::<CircleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    corner: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Instance data layout (32 bytes):
///
///  offset  0  center  [f32; 2]   loc 1
///  offset  8  radius  [f32; 2]   loc 2  (.x = radius, .y unused)
///  offset 16  color   [f32; 4]   loc 3  (premultiplied)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius: [f32; 2],
    color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
