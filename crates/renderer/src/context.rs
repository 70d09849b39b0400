use std::sync::Arc;

use anyhow::{Context as _, Result};
use winit::window::Window;

use crate::resize::SurfaceExtent;

/// Owns the surface, device, and queue backing the viewer window.
pub struct GpuContext {
    /// Kept alive for the lifetime of the surface it produced.
    _instance: wgpu::Instance,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    line_polygons: bool,
}

impl GpuContext {
    /// Configures the swapchain and creates the device. Requests
    /// `POLYGON_MODE_LINE` when the adapter offers it so the wireframe
    /// toggle can work; otherwise the toggle stays inert.
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create rendering surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("failed to find a suitable GPU adapter")?;

        let line_polygons = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let required_features = if line_polygons {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            tracing::warn!("adapter lacks POLYGON_MODE_LINE; wireframe toggle disabled");
            wgpu::Features::empty()
        };

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("lavaplane device"),
                required_features,
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            format = ?surface_format,
            width = config.width,
            height = config.height,
            "initialised GPU surface"
        );

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            line_polygons,
        })
    }

    /// Current backing-buffer size.
    pub fn extent(&self) -> SurfaceExtent {
        SurfaceExtent {
            width: self.config.width,
            height: self.config.height,
        }
    }

    pub fn line_polygons_supported(&self) -> bool {
        self.line_polygons
    }

    /// Reconfigures the swapchain to the new size. Zero extents are
    /// ignored; minimised windows keep the previous configuration.
    pub fn resize(&mut self, extent: SurfaceExtent) {
        if extent.width == 0 || extent.height == 0 {
            return;
        }
        self.config.width = extent.width;
        self.config.height = extent.height;
        self.surface.configure(&self.device, &self.config);
        tracing::debug!(width = extent.width, height = extent.height, "resized surface");
    }

    /// Re-applies the current configuration after a lost/outdated surface.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}
