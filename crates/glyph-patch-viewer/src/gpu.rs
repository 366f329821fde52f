// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! GPU setup, pipelines and per-frame buffers.
//!
//! wgpu exposes no tessellation stage, so each patch is an instance whose
//! vertex shader evaluates the Bezier polynomial at `samples` parameter
//! values and emits a line strip.

use anyhow::{anyhow, Result};
use egui_wgpu::wgpu;
use egui_winit::winit::dpi::PhysicalSize;
use egui_winit::winit::window::Window;

use crate::geometry::{FrameGeometry, LineVertex, MarkerInstance, PatchInstance};

/// Parameter samples per patch.
pub const CURVE_SAMPLES: u32 = 48;
/// Half the edge of a control-point marker, in clip units.
pub const MARKER_HALF_SIZE: f32 = 0.012;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub degree: u32,
    pub samples: u32,
    pub marker_half_size: f32,
    pub aspect: f32,
}

/// Vertex/instance buffer that grows to fit.
pub struct GrowableBuffer {
    label: &'static str,
    pub buf: wgpu::Buffer,
    capacity: u64,
    pub len: u32,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: u64) -> Self {
        Self {
            label,
            buf: create_vertex_buffer(device, label, capacity),
            capacity,
            len: 0,
        }
    }

    fn upload<T: bytemuck::Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, items: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(items);
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buf = create_vertex_buffer(device, self.label, self.capacity);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buf, 0, bytes);
        }
        self.len = items.len() as u32;
    }

    pub fn used_bytes<T>(&self) -> u64 {
        u64::from(self.len) * std::mem::size_of::<T>() as u64
    }
}

pub struct Pipelines {
    pub patch: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
    pub markers: wgpu::RenderPipeline,
}

pub struct Gpu {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pmode_fast: wgpu::PresentMode,
    pub pmode_vsync: wgpu::PresentMode,
    pub sample_count: u32,
    pub max_tex: u32,
    pub msaa_view: Option<wgpu::TextureView>,
    pub globals_buf: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub patches: GrowableBuffer,
    pub lines: GrowableBuffer,
    pub markers: GrowableBuffer,
    pub pipelines: Pipelines,
}

impl Gpu {
    pub async fn new(window: &'static Window, vsync: bool) -> Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("no suitable GPU adapter: {e}"))?;
        let limits = adapter.limits();
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("glyph-patch-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(limits.clone()),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
            })
            .await?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow!("surface reports no texture formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let pmode_fast = caps
            .present_modes
            .iter()
            .copied()
            .find(|m| {
                matches!(
                    m,
                    wgpu::PresentMode::Immediate | wgpu::PresentMode::AutoNoVsync
                )
            })
            .unwrap_or(wgpu::PresentMode::Fifo);
        let pmode_vsync = caps
            .present_modes
            .iter()
            .copied()
            .find(|m| matches!(m, wgpu::PresentMode::Fifo))
            .unwrap_or(pmode_fast);
        let max_dim = limits.max_texture_dimension_2d;
        let sample_count = 4;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.min(max_dim).max(1),
            height: size.height.min(max_dim).max(1),
            present_mode: if vsync { pmode_vsync } else { pmode_fast },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let msaa_view = create_msaa(
            &device,
            config.format,
            config.width,
            config.height,
            sample_count,
        );

        let globals_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader_patches =
            device.create_shader_module(wgpu::include_wgsl!("shader_patches.wgsl"));
        let shader_lines = device.create_shader_module(wgpu::include_wgsl!("shader_lines.wgsl"));
        let shader_markers =
            device.create_shader_module(wgpu::include_wgsl!("shader_markers.wgsl"));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&globals_layout],
            push_constant_ranges: &[],
        });

        let target = [Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        })];
        let multisample = wgpu::MultisampleState {
            count: sample_count,
            ..Default::default()
        };

        let patch = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("patch_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_patches,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<PatchInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x2,
                        2 => Float32x2,
                        3 => Float32x2,
                        4 => Float32x3,
                        5 => Float32x3,
                        6 => Float32x3,
                        7 => Float32x3
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_patches,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample,
            multiview: None,
            cache: None,
        });

        let lines = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_lines,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_lines,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample,
            multiview: None,
            cache: None,
        });

        let markers = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("marker_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_markers,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MarkerInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_markers,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample,
            multiview: None,
            cache: None,
        });

        if let Some(err) = device.pop_error_scope().await {
            return Err(anyhow!("shader or pipeline build failed: {err}"));
        }

        let patches = GrowableBuffer::new(
            &device,
            "patches",
            (std::mem::size_of::<PatchInstance>() * 4096) as u64,
        );
        let lines_buf = GrowableBuffer::new(
            &device,
            "polygon_lines",
            (std::mem::size_of::<LineVertex>() * 256) as u64,
        );
        let markers_buf = GrowableBuffer::new(
            &device,
            "markers",
            (std::mem::size_of::<MarkerInstance>() * 128) as u64,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pmode_fast,
            pmode_vsync,
            sample_count,
            max_tex: max_dim,
            msaa_view,
            globals_buf,
            bind_group,
            patches,
            lines: lines_buf,
            markers: markers_buf,
            pipelines: Pipelines {
                patch,
                lines,
                markers,
            },
        })
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width.min(self.max_tex);
        self.config.height = size.height.min(self.max_tex);
        self.surface.configure(&self.device, &self.config);
        self.msaa_view = create_msaa(
            &self.device,
            self.config.format,
            self.config.width,
            self.config.height,
            self.sample_count,
        );
    }

    pub fn set_vsync(&mut self, on: bool) {
        let mode = if on {
            self.pmode_vsync
        } else {
            self.pmode_fast
        };
        if self.config.present_mode != mode {
            self.config.present_mode = mode;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Push this frame's geometry and the `degree` uniform to the GPU.
    pub fn upload(&mut self, geometry: &FrameGeometry) {
        let globals = Globals {
            degree: u32::from(geometry.degree.order()),
            samples: CURVE_SAMPLES,
            marker_half_size: MARKER_HALF_SIZE,
            aspect: self.config.width as f32 / self.config.height.max(1) as f32,
        };
        self.queue
            .write_buffer(&self.globals_buf, 0, bytemuck::bytes_of(&globals));
        self.patches
            .upload(&self.device, &self.queue, &geometry.patches);
        self.lines.upload(&self.device, &self.queue, &geometry.lines);
        self.markers
            .upload(&self.device, &self.queue, &geometry.markers);
    }
}

// Helpers ------------------------------------------------------------

fn create_vertex_buffer(device: &wgpu::Device, label: &str, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size.max(4),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_msaa(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    w: u32,
    h: u32,
    sample_count: u32,
) -> Option<wgpu::TextureView> {
    if sample_count <= 1 {
        return None;
    }
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("msaa"),
        size: wgpu::Extent3d {
            width: w.max(1),
            height: h.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    Some(tex.create_view(&wgpu::TextureViewDescriptor::default()))
}
