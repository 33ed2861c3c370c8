//! wgpu-based forward renderer.
//!
//! GPU resources mirror the scene lazily: vertex and index buffers upload
//! the first time a mesh is drawn, textures the first time a material
//! references them, and bind groups rebuild only when a mesh's material
//! changes. Entries whose mesh or texture left the frame are evicted after
//! each draw. The scene stays the single source of truth; nothing here
//! feeds back into it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use log::{info, warn};
use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::color;
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::material::Material;
use crate::node::NodeId;
use crate::scene::{Background, DrawItem, Scene};
use crate::texture::{FilterMethod, Sampler, Texture, WrapMode};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    tex_coord: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_dir: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct Locals {
    world: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

/// GPU-side copy of one mesh.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    locals_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    /// Material snapshot the bind group was built from.
    material: Material,
}

struct GpuTexture {
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

pub(crate) struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    mesh_pipeline: wgpu::RenderPipeline,
    locals_layout: wgpu::BindGroupLayout,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    background_pipeline: wgpu::RenderPipeline,
    background_layout: wgpu::BindGroupLayout,
    /// Texture identity the cached background bind group was built from.
    background_bind_group: Option<(usize, wgpu::BindGroup)>,

    white_texture: GpuTexture,
    meshes: HashMap<NodeId, GpuMesh>,
    textures: HashMap<usize, GpuTexture>,
}

impl Renderer {
    pub(crate) async fn new(window: Arc<winit::window::Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("horloge device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ]
        .into_iter()
        .find(|f| caps.formats.contains(f))
        .or_else(|| caps.formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, &config);

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("horloge globals layout"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
                std::mem::size_of::<Globals>(),
            )],
        });

        let locals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("horloge locals layout"),
            entries: &[
                uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX_FRAGMENT,
                    std::mem::size_of::<Locals>(),
                ),
                texture_entry(1),
                sampler_entry(2),
            ],
        });

        let background_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("horloge background layout"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("horloge mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/phong.wgsl").into()),
        });
        let background_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("horloge background shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/background.wgsl").into()),
        });

        let mesh_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("horloge mesh pipeline layout"),
                bind_group_layouts: &[&globals_layout, &locals_layout],
                immediate_size: 0,
            });

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("horloge mesh pipeline"),
            layout: Some(&mesh_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &mesh_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let background_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("horloge background pipeline layout"),
                bind_group_layouts: &[&background_layout],
                immediate_size: 0,
            });

        let background_pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("horloge background pipeline"),
                layout: Some(&background_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &background_shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &background_shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::Always,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("horloge globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("horloge globals bind group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // Untextured materials sample this instead of branching in the
        // shader.
        let white_texture = {
            let texture = Texture::new(vec![0xFF; 4], 1, 1)?;
            upload_texture(&device, &queue, &texture)
        };

        Ok(Renderer {
            surface,
            device,
            queue,
            config,
            depth_view,
            mesh_pipeline,
            locals_layout,
            globals_buffer,
            globals_bind_group,
            background_pipeline,
            background_layout,
            background_bind_group: None,
            white_texture,
            meshes: HashMap::new(),
            textures: HashMap::new(),
        })
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
    }

    /// Draws one frame of `scene` from `camera`.
    ///
    /// Transient surface errors skip the frame; only running out of surface
    /// memory is fatal.
    pub(crate) fn render(&mut self, scene: &mut Scene, camera: &Camera) -> Result<()> {
        scene.sync();

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) | Err(wgpu::SurfaceError::Other) => {
                warn!("skipping frame: surface texture unavailable");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(Error::SurfaceOutOfMemory),
        };
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.write_globals(scene, camera);
        let draw_list = scene.draw_list();
        for item in &draw_list {
            self.prepare_mesh(item.node, &item.geometry, &item.material, item.world.matrix());
        }
        self.prepare_background(&scene.background);
        self.evict_stale(&draw_list, &scene.background);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("horloge frame encoder"),
            });
        {
            let clear = clear_color(&scene.background);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("horloge scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some((_, bind_group)) = &self.background_bind_group {
                pass.set_pipeline(&self.background_pipeline);
                pass.set_bind_group(0, bind_group, &[]);
                pass.draw(0..3, 0..1);
            }

            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for item in &draw_list {
                // prepare_mesh just populated every drawn node.
                if let Some(mesh) = self.meshes.get(&item.node) {
                    pass.set_bind_group(1, &mesh.bind_group, &[]);
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn write_globals(&self, scene: &Scene, camera: &Camera) {
        let world = scene.resolve(camera).world_transform;
        let view = Mat4::from_scale_rotation_translation(
            Vec3::splat(world.scale),
            world.orientation,
            world.position,
        )
        .inverse();
        let aspect = self.config.width as f32 / self.config.height as f32;
        let view_proj = camera.projection.matrix(aspect) * view;

        let light = scene.directional_light;
        let ambient = scene.ambient_light;
        let globals = Globals {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: world.position.extend(1.0).to_array(),
            light_dir: light.position.normalize_or_zero().extend(0.0).to_array(),
            light_color: scaled_rgb(light.color, light.intensity).to_array(),
            ambient: scaled_rgb(ambient.color, ambient.intensity).to_array(),
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    /// Uploads mesh data on first sight, refreshes per-frame locals, and
    /// rebuilds the bind group when the material changed.
    fn prepare_mesh(
        &mut self,
        node: NodeId,
        geometry: &Geometry,
        material: &Material,
        world: Mat4,
    ) {
        if let Some(texture) = material.map() {
            self.ensure_texture(texture);
        }

        if !self.meshes.contains_key(&node) {
            let vertices: Vec<Vertex> = geometry
                .positions
                .iter()
                .zip(&geometry.normals)
                .zip(&geometry.tex_coords)
                .map(|((position, normal), tex_coord)| Vertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    tex_coord: tex_coord.to_array(),
                })
                .collect();
            let indices: Vec<u32> = geometry.faces.iter().flatten().copied().collect();

            let vertex_buffer =
                self.device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("horloge mesh vertices"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
            let index_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("horloge mesh indices"),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            let locals_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("horloge mesh locals"),
                size: std::mem::size_of::<Locals>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self.mesh_bind_group(&locals_buffer, material);

            self.meshes.insert(
                node,
                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: indices.len() as u32,
                    locals_buffer,
                    bind_group,
                    material: material.clone(),
                },
            );
        } else if self
            .meshes
            .get(&node)
            .map_or(false, |mesh| mesh.material != *material)
        {
            let bind_group = {
                let mesh = &self.meshes[&node];
                self.mesh_bind_group(&mesh.locals_buffer, material)
            };
            if let Some(mesh) = self.meshes.get_mut(&node) {
                mesh.bind_group = bind_group;
                mesh.material = material.clone();
            }
        }

        if let Some(mesh) = self.meshes.get(&node) {
            let rgb = color::to_linear_rgb(material.color());
            let (glossiness, lit) = match material {
                Material::Basic(_) => (0.0, 0.0),
                Material::Phong(params) => (params.glossiness, 1.0),
            };
            let locals = Locals {
                world: world.to_cols_array_2d(),
                color: [rgb[0], rgb[1], rgb[2], 1.0],
                params: [glossiness, lit, 0.0, 0.0],
            };
            self.queue
                .write_buffer(&mesh.locals_buffer, 0, bytemuck::bytes_of(&locals));
        }
    }

    fn mesh_bind_group(&self, locals: &wgpu::Buffer, material: &Material) -> wgpu::BindGroup {
        let gpu_texture = material
            .map()
            .and_then(|texture| self.textures.get(&texture.id()))
            .unwrap_or(&self.white_texture);

        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("horloge mesh bind group"),
            layout: &self.locals_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: locals.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&gpu_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&gpu_texture.sampler),
                },
            ],
        })
    }

    fn ensure_texture(&mut self, texture: &Texture) {
        if !self.textures.contains_key(&texture.id()) {
            let uploaded = upload_texture(&self.device, &self.queue, texture);
            self.textures.insert(texture.id(), uploaded);
        }
    }

    /// Drops cached GPU state whose mesh or texture no longer appears in
    /// the frame.
    fn evict_stale(&mut self, draw_list: &[DrawItem], background: &Background) {
        let live_nodes: HashSet<NodeId> = draw_list.iter().map(|item| item.node).collect();
        retain_keys(&mut self.meshes, &live_nodes);

        let mut live_textures: HashSet<usize> = draw_list
            .iter()
            .filter_map(|item| item.material.map())
            .map(|texture| texture.id())
            .collect();
        if let Background::Texture(texture) = background {
            live_textures.insert(texture.id());
        }
        retain_keys(&mut self.textures, &live_textures);
    }

    /// Keeps the cached background bind group in step with the scene
    /// background; `None` while the background is a plain color.
    fn prepare_background(&mut self, background: &Background) {
        let texture = match background {
            Background::Texture(texture) => texture,
            Background::Color(_) => {
                self.background_bind_group = None;
                return;
            }
        };

        self.ensure_texture(texture);
        let stale = self
            .background_bind_group
            .as_ref()
            .map_or(true, |(id, _)| *id != texture.id());
        if stale {
            let gpu_texture = &self.textures[&texture.id()];
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("horloge background bind group"),
                layout: &self.background_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&gpu_texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&gpu_texture.sampler),
                    },
                ],
            });
            self.background_bind_group = Some((texture.id(), bind_group));
        }
    }
}

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("horloge depth"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn upload_texture(device: &wgpu::Device, queue: &wgpu::Queue, texture: &Texture) -> GpuTexture {
    let size = wgpu::Extent3d {
        width: texture.width(),
        height: texture.height(),
        depth_or_array_layers: 1,
    };
    let gpu = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("horloge texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &gpu,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        texture.pixels(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * texture.width()),
            rows_per_image: Some(texture.height()),
        },
        size,
    );

    GpuTexture {
        view: gpu.create_view(&wgpu::TextureViewDescriptor::default()),
        sampler: device.create_sampler(&sampler_descriptor(texture.sampler)),
    }
}

fn sampler_descriptor(sampler: Sampler) -> wgpu::SamplerDescriptor<'static> {
    let filter = match sampler.filter {
        FilterMethod::Nearest => wgpu::FilterMode::Nearest,
        FilterMethod::Bilinear => wgpu::FilterMode::Linear,
    };
    let address = |wrap| match wrap {
        WrapMode::Repeat => wgpu::AddressMode::Repeat,
        WrapMode::Clamp => wgpu::AddressMode::ClampToEdge,
    };
    wgpu::SamplerDescriptor {
        label: Some("horloge sampler"),
        address_mode_u: address(sampler.wrap_u),
        address_mode_v: address(sampler.wrap_v),
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    }
}

fn retain_keys<K, V>(cache: &mut HashMap<K, V>, live: &HashSet<K>)
where
    K: Eq + std::hash::Hash,
{
    cache.retain(|key, _| live.contains(key));
}

fn clear_color(background: &Background) -> wgpu::Color {
    match background {
        Background::Color(value) => {
            let [r, g, b] = color::to_linear_rgb(*value);
            wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            }
        }
        Background::Texture(_) => wgpu::Color::BLACK,
    }
}

fn scaled_rgb(value: color::Color, intensity: f32) -> Vec4 {
    let [r, g, b] = color::to_linear_rgb(value);
    Vec4::new(r * intensity, g * intensity, b * intensity, 1.0)
}

fn uniform_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
    size: usize,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: std::num::NonZeroU64::new(size as u64),
        },
        count: None,
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::retain_keys;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn stale_cache_entries_are_dropped() {
        let mut cache: HashMap<usize, &str> = HashMap::from([(1, "a"), (2, "b"), (3, "c")]);
        let live: HashSet<usize> = HashSet::from([1, 3]);
        retain_keys(&mut cache, &live);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains_key(&1));
        assert!(cache.contains_key(&3));
        assert!(!cache.contains_key(&2));
    }
}
