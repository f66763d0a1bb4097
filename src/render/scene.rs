use super::helpers::{DEPTH_FORMAT, HDR_FORMAT};
use crate::constants::{AMBIENT_INTENSITY, MAX_LIGHTS, SUN_DIRECTION, SUN_INTENSITY};
use crate::core::mascot::{DrawList, MeshId, Part};
use crate::core::mesh::{MeshData, MorphMesh, Vertex};
use crate::core::{BODY_SEGMENTS, DETAIL_SEGMENTS};
use fnv::FnvHashMap;
use glam::{Mat3, Mat4, Vec3};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneGlobals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    // xyz toward the sun, w intensity
    sun_dir: [f32; 4],
    light_count: [u32; 4],
    // xyz position, w range (0 = unbounded)
    lights_pos: [[f32; 4]; MAX_LIGHTS],
    // rgb color, w intensity
    lights_color: [[f32; 4]; MAX_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceRaw {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 3],
    color: [f32; 4],
    // metalness, roughness, unlit flag, unused
    material: [f32; 4],
    emissive: [f32; 4],
}

impl InstanceRaw {
    fn from_part(part: &Part) -> Self {
        let n = Mat3::from_mat4(part.model).inverse().transpose();
        let m = &part.material;
        Self {
            model: part.model.to_cols_array_2d(),
            normal: [n.x_axis.extend(0.0).to_array(), n.y_axis.extend(0.0).to_array(), n.z_axis.extend(0.0).to_array()],
            color: part.color.extend(m.opacity).to_array(),
            material: [m.metalness, m.roughness, if m.unlit { 1.0 } else { 0.0 }, 0.0],
            emissive: m.emissive.extend(0.0).to_array(),
        }
    }
}

const MAX_PARTS: usize = 64;

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 10] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
    6 => Float32x4, 7 => Float32x4, 8 => Float32x4,
    9 => Float32x4, 10 => Float32x4, 11 => Float32x4,
];
const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

/// Mesh pipelines, resident meshes and per-frame buffers for the mascot pass.
pub(crate) struct SceneResources {
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    meshes: FnvHashMap<MeshId, GpuMesh>,
    body: MorphMesh,
    // Mesh per uploaded instance slot, opaque parts first
    order: Vec<MeshId>,
    opaque_count: usize,
}

fn make_mesh_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    translucent: bool,
) -> wgpu::RenderPipeline {
    let blend = if translucent {
        wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING
    } else {
        wgpu::BlendState::REPLACE
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(if translucent { "mesh_translucent" } else { "mesh_opaque" }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceRaw>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRIBUTES,
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: !translucent,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device) -> anyhow::Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mascot_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::MASCOT_WGSL.into()),
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_globals"),
            size: std::mem::size_of::<SceneGlobals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<InstanceRaw>() * MAX_PARTS) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut body = MorphMesh::new(MeshData::squared(BODY_SEGMENTS), MeshData::blob(BODY_SEGMENTS))
            .ok_or_else(|| anyhow::anyhow!("body shapes differ in topology"))?;
        body.apply(0.0);

        let mut meshes = FnvHashMap::default();
        meshes.insert(
            MeshId::Body,
            GpuMesh::upload(device, "body_mesh", body.vertices(), body.indices()),
        );
        let resident = [
            (MeshId::Sphere, "sphere_mesh", MeshData::sphere(1.0, DETAIL_SEGMENTS)),
            (MeshId::Cuboid, "cuboid_mesh", MeshData::cuboid(Vec3::splat(0.5))),
            (MeshId::Cylinder, "cylinder_mesh", MeshData::cylinder(1.0, 1.0, DETAIL_SEGMENTS)),
            (MeshId::Smile, "smile_mesh", MeshData::half_torus(0.25, 0.04, 12, DETAIL_SEGMENTS)),
        ];
        for (id, label, mesh) in resident {
            meshes.insert(id, GpuMesh::upload(device, label, &mesh.vertices, &mesh.indices));
        }

        Ok(Self {
            opaque_pipeline: make_mesh_pipeline(device, &layout, &shader, false),
            translucent_pipeline: make_mesh_pipeline(device, &layout, &shader, true),
            globals_buffer,
            globals_bg,
            instance_buffer,
            meshes,
            body,
            order: Vec::with_capacity(MAX_PARTS),
            opaque_count: 0,
        })
    }

    /// Upload globals, instances and the morphed body for this frame.
    pub(crate) fn prepare(
        &mut self,
        queue: &wgpu::Queue,
        draw: &DrawList,
        view_proj: Mat4,
        camera_pos: Vec3,
    ) {
        if let Some(factor) = draw.morph {
            if self.body.apply(factor) {
                if let Some(mesh) = self.meshes.get(&MeshId::Body) {
                    queue.write_buffer(&mesh.vertex_buffer, 0, bytemuck::cast_slice(self.body.vertices()));
                }
            }
        }

        let mut globals = SceneGlobals {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera_pos.extend(1.0).to_array(),
            ambient: Vec3::splat(AMBIENT_INTENSITY).extend(0.0).to_array(),
            sun_dir: Vec3::from_array(SUN_DIRECTION)
                .normalize_or_zero()
                .extend(SUN_INTENSITY)
                .to_array(),
            light_count: [0; 4],
            lights_pos: [[0.0; 4]; MAX_LIGHTS],
            lights_color: [[0.0; 4]; MAX_LIGHTS],
        };
        let lights = draw.lights.iter().take(MAX_LIGHTS);
        for (i, light) in lights.enumerate() {
            globals.lights_pos[i] = light.position.extend(light.range).to_array();
            globals.lights_color[i] = light.color.extend(light.intensity).to_array();
            globals.light_count[0] = i as u32 + 1;
        }
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        if draw.parts.len() > MAX_PARTS {
            log::warn!("[scene] {} parts, drawing first {}", draw.parts.len(), MAX_PARTS);
        }
        let parts = &draw.parts[..draw.parts.len().min(MAX_PARTS)];
        let is_opaque = |p: &&Part| p.material.opacity >= 1.0;
        let mut instances: Vec<InstanceRaw> = Vec::with_capacity(parts.len());
        self.order.clear();
        for part in parts.iter().filter(is_opaque).chain(parts.iter().filter(|p| !is_opaque(p))) {
            instances.push(InstanceRaw::from_part(part));
            self.order.push(part.mesh);
        }
        self.opaque_count = parts.iter().filter(is_opaque).count();
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(0, &self.globals_bg, &[]);
        rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        for (slot, id) in self.order.iter().enumerate() {
            let pipeline = if slot < self.opaque_count {
                &self.opaque_pipeline
            } else {
                &self.translucent_pipeline
            };
            let Some(mesh) = self.meshes.get(id) else {
                continue;
            };
            let instance = slot as u32;
            rpass.set_pipeline(pipeline);
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, instance..instance + 1);
        }
    }
}
