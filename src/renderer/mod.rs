pub mod pipeline;

use std::sync::Arc;

use glam::Vec2;
use image::RgbaImage;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::canvas::{Canvas, Color, DrawCommand};
use crate::sheet::{AtlasLayout, SheetSet};
use pipeline::{QuadPipeline, QuadVertex, create_quad_pipeline, orthographic_projection};

/// GPU renderer: owns the surface and the single quad pipeline, and turns a
/// [`Canvas`] worth of draw commands into one render pass per frame.
pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: QuadPipeline,
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
    /// Texture bind group for the sheet atlas — a 1×1 white stand-in when no
    /// sheets are loaded, so circle-only frames bind the same layout.
    sheet_bind_group: wgpu::BindGroup,
    /// Where each (variant, frame) sits inside the atlas; `None` when the
    /// demo runs without sheets.
    layout: Option<AtlasLayout>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, sheets: Option<&SheetSet>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window)).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .expect("no suitable GPU adapter found");

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .expect("failed to create device");

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_quad_pipeline(&device, format);

        let proj = orthographic_projection(config.width as f32, config.height as f32);
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(&proj),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let (atlas_img, layout) = match sheets {
            Some(set) => {
                let layout = AtlasLayout::for_counts(set.frame_w, set.frame_h, &set.frame_counts());
                (bake_atlas(set, &layout), Some(layout))
            }
            None => (white_pixel(), None),
        };
        let sheet_bind_group = upload_atlas(&device, &queue, &pipeline, &atlas_img);

        Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            projection_buffer,
            projection_bind_group,
            sheet_bind_group,
            layout,
        }
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let proj = orthographic_projection(new_size.width as f32, new_size.height as f32);
        self.queue
            .write_buffer(&self.projection_buffer, 0, bytemuck::cast_slice(&proj));
    }

    /// Render one frame: clear to the canvas background, then draw every
    /// queued command in submission order (later commands on top).
    pub fn render(&mut self, canvas: &Canvas) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let verts = self.build_vertices(canvas);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let bg = canvas.clear_color().0;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: bg[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !verts.is_empty() {
                let vbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("quad_vertex_buffer"),
                    contents: bytemuck::cast_slice(&verts),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                pass.set_pipeline(&self.pipeline.render_pipeline);
                pass.set_bind_group(0, &self.projection_bind_group, &[]);
                pass.set_bind_group(1, &self.sheet_bind_group, &[]);
                pass.set_vertex_buffer(0, vbuf.slice(..));
                pass.draw(0..verts.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn build_vertices(&self, canvas: &Canvas) -> Vec<QuadVertex> {
        let mut verts = Vec::with_capacity(canvas.commands().len() * 6);
        for cmd in canvas.commands() {
            match *cmd {
                DrawCommand::Circle { center, radius, color } => {
                    push_quad(&mut verts, center, radius, radius, [0.0, 0.0], [1.0, 1.0], color, 1.0);
                }
                DrawCommand::Frame { center, variant, frame } => {
                    // Frame commands without a loaded sheet set would mean a
                    // scene misconfiguration; there is nothing to draw.
                    let Some(layout) = self.layout else { continue };
                    let (uv_min, uv_max) = layout.uv(variant, frame);
                    push_quad(
                        &mut verts,
                        center,
                        layout.frame_w as f32 * 0.5,
                        layout.frame_h as f32 * 0.5,
                        uv_min,
                        uv_max,
                        Color::WHITE,
                        0.0,
                    );
                }
            }
        }
        verts
    }
}

#[allow(clippy::too_many_arguments)]
fn push_quad(
    verts: &mut Vec<QuadVertex>,
    center: Vec2,
    half_w: f32,
    half_h: f32,
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: Color,
    shape: f32,
) {
    let c = color.0;
    let (l, t) = (center.x - half_w, center.y - half_h);
    let (r, b) = (center.x + half_w, center.y + half_h);

    let tl = QuadVertex { position: [l, t], uv: uv_min, color: c, shape };
    let tr = QuadVertex { position: [r, t], uv: [uv_max[0], uv_min[1]], color: c, shape };
    let bl = QuadVertex { position: [l, b], uv: [uv_min[0], uv_max[1]], color: c, shape };
    let br = QuadVertex { position: [r, b], uv: uv_max, color: c, shape };
    verts.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
}

/// Composite every variant's frames into one RGBA atlas per the layout grid.
fn bake_atlas(set: &SheetSet, layout: &AtlasLayout) -> RgbaImage {
    let (aw, ah) = layout.atlas_size();
    let mut atlas = RgbaImage::new(aw, ah);
    for (v, strip) in set.variants().iter().enumerate() {
        for (f, frame) in strip.frames.iter().enumerate() {
            let (ox, oy) = layout.pixel_origin(v, f);
            for (x, y, px) in frame.enumerate_pixels() {
                atlas.put_pixel(ox + x, oy + y, *px);
            }
        }
    }
    atlas
}

/// Stand-in atlas for circle-only runs.
fn white_pixel() -> RgbaImage {
    RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]))
}

fn upload_atlas(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &QuadPipeline,
    img: &RgbaImage,
) -> wgpu::BindGroup {
    let (w, h) = img.dimensions();
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some("sheet_atlas_tex"),
            size: wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        img.as_raw(),
    );
    let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("sheet_atlas_bg"),
        layout: &pipeline.sheet_bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}
