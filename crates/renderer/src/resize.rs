use winit::dpi::PhysicalSize;

use crate::compositor::Compositor;
use crate::context::GpuContext;

/// Size of a drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceExtent {
    pub width: u32,
    pub height: u32,
}

impl SurfaceExtent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<PhysicalSize<u32>> for SurfaceExtent {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Pure resize decision: does the backing buffer differ from the window?
pub fn needs_resize(current: SurfaceExtent, target: SurfaceExtent) -> bool {
    current != target
}

/// Compares the window size against the backing buffer and, on mismatch,
/// resizes the compositor and then the surface. Returns whether a resize
/// happened so the caller can recompute the camera aspect. Idempotent: a
/// second call with an unchanged window size reports `false`.
pub fn resize_to_window(
    ctx: &mut GpuContext,
    compositor: &mut Compositor,
    window_size: PhysicalSize<u32>,
) -> bool {
    let target = SurfaceExtent::from(window_size);
    if target.width == 0 || target.height == 0 {
        return false;
    }
    if !needs_resize(ctx.extent(), target) {
        return false;
    }
    compositor.resize(&ctx.device, target);
    ctx.resize(target);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_requires_resize() {
        let current = SurfaceExtent::new(1280, 720);
        assert!(needs_resize(current, SurfaceExtent::new(1280, 721)));
        assert!(needs_resize(current, SurfaceExtent::new(1920, 1080)));
    }

    #[test]
    fn equal_extents_do_not_resize() {
        let current = SurfaceExtent::new(1280, 720);
        assert!(!needs_resize(current, current));
    }

    #[test]
    fn repeat_decision_is_idempotent() {
        let mut current = SurfaceExtent::new(1280, 720);
        let target = SurfaceExtent::new(1600, 900);
        assert!(needs_resize(current, target));
        // After applying the resize the backing buffer equals the target.
        current = target;
        assert!(!needs_resize(current, target));
    }
}
