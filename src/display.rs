//! Window display backend: frames are traced into a [`FrameBuffer`], uploaded
//! to a texture and drawn as a full-screen quad.

use wgpu::{
    include_wgsl, CommandEncoderDescriptor, PipelineLayoutDescriptor, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipelineDescriptor, TextureViewDescriptor,
};

use crate::application::Screen;
use crate::error::Result;
use crate::frame::DisplayBackend;
use crate::framebuffer::FrameBuffer;
use crate::renderer::{IndexBuffer, Vertex, VertexBuffer, QUAD_INDICES, QUAD_VERTICES};
use crate::scene::Colour;
use crate::texture::Texture;

pub struct WindowDisplay {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
    texture: Texture,
    frame_bind_group: wgpu::BindGroup,
    frame: FrameBuffer,
    cancel_requested: bool,
}

impl WindowDisplay {
    pub fn new(screen: &Screen, width: u32, height: u32) -> Self {
        let shader = screen
            .device
            .create_shader_module(include_wgsl!("asset/shader/frame_quad.wgsl"));

        let vertex_buffer = VertexBuffer::init_immediate(
            &screen.device,
            bytemuck::cast_slice(QUAD_VERTICES),
            Some("Vertex Buffer"),
        );
        let index_buffer =
            IndexBuffer::init_immediate_u16(&screen.device, QUAD_INDICES, Some("Index Buffer"));

        let frame = FrameBuffer::new(width, height);
        let texture = Texture::from_image(
            &screen.device,
            &screen.queue,
            frame.image(),
            width,
            height,
            Some("Frame texture"),
        );

        let texture_bind_group_layout =
            screen
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                multisampled: false,
                                view_dimension: wgpu::TextureViewDimension::D2,
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                    label: Some("frame_bind_group_layout"),
                });

        let frame_bind_group = screen.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
            label: Some("frame_bind_group"),
        });

        let render_pipeline_layout =
            screen
                .device
                .create_pipeline_layout(&PipelineLayoutDescriptor {
                    label: Some("Render Pipeline Layout"),
                    bind_group_layouts: &[&texture_bind_group_layout],
                    push_constant_ranges: &[],
                });

        let render_pipeline = screen
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some("Render Pipeline"),
                layout: Some(&render_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: "vs_main",
                    buffers: &[Vertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: screen.config.format,
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
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
            });

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            texture,
            frame_bind_group,
            frame,
            cancel_requested: false,
        }
    }

    /// Asks the display to report cancellation at the end of the current frame.
    pub fn request_cancel(&mut self) {
        self.cancel_requested = true;
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Borrows the display together with the screen it presents to.
    pub fn target<'a>(&'a mut self, screen: &'a Screen) -> ScreenTarget<'a> {
        ScreenTarget {
            display: self,
            screen,
        }
    }

    fn present_to(&mut self, screen: &Screen) -> Result<()> {
        self.texture.update_data(
            &screen.queue,
            self.frame.image(),
            self.frame.width(),
            self.frame.height(),
        );

        let output = screen.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&TextureViewDescriptor::default());
        let mut encoder = screen
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.buffer().slice(..));
            render_pass.set_index_buffer(
                self.index_buffer.buffer().slice(..),
                self.index_buffer.format(),
            );
            render_pass.draw_indexed(0..self.index_buffer.count(), 0, 0..1);
        }

        screen.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.frame.mark_presented();

        Ok(())
    }
}

/// [`DisplayBackend`] over a [`WindowDisplay`] and the live [`Screen`].
pub struct ScreenTarget<'a> {
    display: &'a mut WindowDisplay,
    screen: &'a Screen,
}

impl DisplayBackend for ScreenTarget<'_> {
    fn draw_pixel(&mut self, x: u32, y: u32, colour: Colour) {
        self.display.frame.put(x, y, colour);
    }

    fn present(&mut self) -> Result<()> {
        self.display.present_to(self.screen)
    }

    fn poll_cancel(&mut self) -> bool {
        self.display.cancel_requested
    }
}
