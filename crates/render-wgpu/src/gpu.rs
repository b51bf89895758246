use prism_render::{FrameParams, ParamBindings, RenderError, bindings};
use prism_scene::{HEADER_SIZE, SLOT_SIZE, Scene};
use wgpu::util::DeviceExt;

use crate::shaders;

/// Largest primitive array that fits the default 64 KiB uniform binding.
pub const MAX_UNIFORM_SLOTS: usize = 65536 / SLOT_SIZE;

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// wgpu scene renderer: one full-screen pass over the encoded primitives.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    primitive_buffer: wgpu::Buffer,
    header_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    params: ParamBindings,
    frame_block: [u8; shaders::FRAME_BLOCK_SIZE],
    max_slots: usize,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    /// Build the pipeline for a scene of `max_slots` primitives.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        max_slots: usize,
    ) -> Result<Self, RenderError> {
        if max_slots == 0 || max_slots > MAX_UNIFORM_SLOTS {
            return Err(RenderError::SlotLimit {
                requested: max_slots,
                limit: MAX_UNIFORM_SLOTS,
            });
        }
        let params = ParamBindings::resolve(shaders::frame_offset)?;

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_params"),
            contents: &[0u8; shaders::FRAME_BLOCK_SIZE],
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let primitive_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("primitive_slots"),
            size: (max_slots * SLOT_SIZE) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let header_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("primitive_header"),
            contents: &[0u8; HEADER_SIZE],
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[
                uniform_entry(bindings::FRAME),
                uniform_entry(bindings::PRIMITIVES),
                uniform_entry(bindings::HEADER),
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: bindings::FRAME,
                    resource: frame_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::PRIMITIVES,
                    resource: primitive_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::HEADER,
                    resource: header_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::scene_shader(max_slots).into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        tracing::info!(max_slots, ?surface_format, "scene pipeline ready");

        Ok(Self {
            pipeline,
            frame_buffer,
            primitive_buffer,
            header_buffer,
            bind_group,
            params,
            frame_block: [0u8; shaders::FRAME_BLOCK_SIZE],
            max_slots,
            surface_format,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    /// Copy this frame's parameters and any re-encoded slots to the GPU.
    ///
    /// Only the dirty slot range is uploaded; the header is uploaded only
    /// when the primitive count changed.
    pub fn upload(
        &mut self,
        queue: &wgpu::Queue,
        scene: &mut Scene,
        frame: &FrameParams,
    ) -> Result<(), RenderError> {
        self.params.write(frame, &mut self.frame_block)?;
        queue.write_buffer(&self.frame_buffer, 0, &self.frame_block);

        if let Some(range) = scene.buffer_mut().take_dirty() {
            let limit = self.max_slots * SLOT_SIZE;
            if range.end > limit {
                return Err(RenderError::BufferTooSmall {
                    needed: range.end,
                    len: limit,
                });
            }
            let bytes = &scene.buffer().as_bytes()[range.clone()];
            queue.write_buffer(&self.primitive_buffer, range.start as u64, bytes);
            tracing::trace!(?range, "primitive slots uploaded");
        }
        if scene.header_mut().take_dirty() {
            queue.write_buffer(&self.header_buffer, 0, scene.header().as_bytes());
        }
        Ok(())
    }

    /// Draw the scene into `view`.
    pub fn render(&self, device: &wgpu::Device, queue: &wgpu::Queue, view: &wgpu::TextureView) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
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
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_limit_fits_default_uniform_binding() {
        assert_eq!(MAX_UNIFORM_SLOTS, 512);
        let limits = wgpu::Limits::default();
        assert!((MAX_UNIFORM_SLOTS * SLOT_SIZE) as u32 <= limits.max_uniform_buffer_binding_size);
    }

    #[test]
    fn uniform_entries_use_requested_binding() {
        let entry = uniform_entry(bindings::PRIMITIVES);
        assert_eq!(entry.binding, 1);
        assert!(matches!(
            entry.ty,
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                ..
            }
        ));
    }
}
