use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context as _, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use renderer::{resize_to_window, Compositor, FrameStats, GpuContext};

use crate::panel;
use crate::session::Session;

/// Frame-delta cap; long stalls (debugger, suspend) advance the
/// animation by at most this much.
const MAX_FRAME_DELTA: f32 = 0.1;

const DEFAULT_SIZE: (u32, u32) = (1280, 720);

pub struct AppOptions {
    pub size: Option<(u32, u32)>,
    pub speed: f32,
    pub grain: bool,
}

/// Viewer application. GPU and UI state is `None` until the event loop
/// delivers `resumed` and the window exists.
pub struct App {
    options: AppOptions,
    session: Session,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    compositor: Option<Compositor>,
    egui_ctx: egui::Context,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    last_frame: Instant,
    stats: FrameStats,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let session = Session::new(options.speed);
        Self {
            options,
            session,
            window: None,
            gpu: None,
            compositor: None,
            egui_ctx: egui::Context::default(),
            egui_winit: None,
            egui_renderer: None,
            last_frame: Instant::now(),
            stats: FrameStats::new(),
        }
    }

    fn initialise(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.options.size.unwrap_or(DEFAULT_SIZE);
        let attributes = Window::default_attributes()
            .with_title("Lava Plane")
            .with_inner_size(PhysicalSize::new(width, height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let gpu = GpuContext::new(window.clone())?;
        let mut compositor = Compositor::new(&gpu, &self.session.palette);
        compositor.grain.enabled = self.options.grain;

        let extent = gpu.extent();
        self.session.camera.set_aspect(extent.width, extent.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.compositor = Some(compositor);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu), Some(compositor), Some(egui_winit), Some(egui_renderer)) = (
            self.window.as_ref(),
            self.gpu.as_mut(),
            self.compositor.as_mut(),
            self.egui_winit.as_mut(),
            self.egui_renderer.as_mut(),
        ) else {
            return;
        };
        let session = &mut self.session;

        let now = Instant::now();
        let raw_delta = now - self.last_frame;
        self.last_frame = now;
        // The readout sees the true cadence; the animation gets the
        // capped delta.
        self.stats.update(raw_delta);
        let delta = raw_delta.min(std::time::Duration::from_secs_f32(MAX_FRAME_DELTA));

        // One clock drives both passes so the grain jitter stays in step
        // with the lava animation.
        let time = session.clock.advance(delta, session.speed);
        compositor.scene.uniforms.time = time;
        compositor.grain.uniforms.time = time;

        if resize_to_window(gpu, compositor, window.inner_size()) {
            let extent = gpu.extent();
            session.camera.set_aspect(extent.width, extent.height);
        }

        session.controls.update();
        let view_proj = session
            .camera
            .view_proj(session.controls.eye(), session.controls.target());
        compositor.scene.uniforms.set_view_proj(view_proj);

        let wireframe_supported = gpu.line_polygons_supported();
        let stats = self.stats;
        let raw_input = egui_winit.take_egui_input(window);
        let output = self.egui_ctx.run(raw_input, |ctx| {
            panel::draw(ctx, session, compositor, &stats, wireframe_supported);
        });
        egui_winit.handle_platform_output(window, output.platform_output);
        let pixels_per_point = output.pixels_per_point;
        let paint_jobs = self.egui_ctx.tessellate(output.shapes, pixels_per_point);

        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost or outdated; reconfiguring");
                gpu.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("surface out of memory; exiting");
                event_loop.exit();
                return;
            }
            Err(err) => {
                tracing::warn!(?err, "skipping frame");
                return;
            }
        };
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        compositor.render(gpu, &mut encoder, &frame_view);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point,
        };
        for (id, image_delta) in &output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("ui pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &frame_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }

        gpu.queue.submit(Some(encoder.finish()));
        for id in &output.textures_delta.free {
            egui_renderer.free_texture(id);
        }
        frame.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.initialise(event_loop) {
            tracing::error!(?err, "initialisation failed");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(window), Some(egui_winit)) = (self.window.as_ref(), self.egui_winit.as_mut()) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            // Resizes are handled by the per-frame adapter in `redraw`,
            // which also covers scale-factor and compositor-driven size
            // changes the event stream can miss.
            WindowEvent::Resized(_) => {}
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.session.controls.rotate(dx as f32, dy as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
