//! Pass chain: base scene pass, then the optional grain pass.
//!
//! The base pass always precedes the grain pass because the grain shader
//! samples the scene's output. While the grain pass is disabled the scene
//! renders straight into the swapchain view, so a disabled pass cannot
//! perturb the presented pixels.

use palette_table::Palette;

use crate::context::GpuContext;
use crate::grain::GrainPass;
use crate::resize::SurfaceExtent;
use crate::scene::ScenePass;

/// Offscreen color target the scene renders into when the grain pass
/// needs something to sample.
struct OffscreenTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    format: wgpu::TextureFormat,
}

impl OffscreenTarget {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat, extent: SurfaceExtent) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("scene color target"),
            size: wgpu::Extent3d {
                width: extent.width.max(1),
                height: extent.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
            format,
        }
    }
}

/// Owns the scene pass, the offscreen target, and the grain pass, and
/// sequences them into one command encoder per frame.
pub struct Compositor {
    pub scene: ScenePass,
    pub grain: GrainPass,
    offscreen: OffscreenTarget,
}

impl Compositor {
    pub fn new(ctx: &GpuContext, palette: &Palette) -> Self {
        let format = ctx.config.format;
        let scene = ScenePass::new(&ctx.device, format, ctx.line_polygons_supported(), palette);
        let offscreen = OffscreenTarget::new(&ctx.device, format, ctx.extent());
        let grain = GrainPass::new(&ctx.device, format, &offscreen.view);
        Self {
            scene,
            grain,
            offscreen,
        }
    }

    /// Recreates the offscreen target at the new size and repoints the
    /// grain pass at it.
    pub fn resize(&mut self, device: &wgpu::Device, extent: SurfaceExtent) {
        self.offscreen = OffscreenTarget::new(device, self.offscreen.format, extent);
        self.grain.rebind(device, &self.offscreen.view);
    }

    /// Uploads uniform state and records the pass chain into `frame_view`.
    pub fn render(
        &self,
        ctx: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        frame_view: &wgpu::TextureView,
    ) {
        self.scene.prepare(&ctx.queue);
        if self.grain.enabled {
            self.grain.prepare(&ctx.queue);
            self.scene.draw(encoder, &self.offscreen.view);
            self.grain.draw(encoder, frame_view);
        } else {
            self.scene.draw(encoder, frame_view);
        }
    }
}
