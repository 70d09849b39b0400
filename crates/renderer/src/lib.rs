//! GPU core for the lava plane viewer.
//!
//! The crate glues the window surface, the displaced-plane scene pass, and
//! the grain post-processing pass together. The overall flow is:
//!
//! ```text
//!   CLI / lavaplane
//!          │
//!          ▼
//!   GpuContext ──▶ ScenePass ─┬─▶ swapchain          (grain disabled)
//!                             └─▶ offscreen ─▶ GrainPass ─▶ swapchain
//! ```
//!
//! [`Compositor`] owns the pass chain and the offscreen color target; the
//! base scene pass always runs before the grain pass because the grain
//! shader samples the scene's rendered output. [`GpuContext`] owns the
//! surface, device, and queue, while the per-frame clock, camera damping,
//! and uniform pushes are driven by the binary's render loop.

pub mod camera;
pub mod clock;
pub mod compositor;
pub mod context;
pub mod grain;
pub mod resize;
pub mod scene;
pub mod uniforms;

pub use camera::{Camera, OrbitControls};
pub use clock::{FrameStats, SimClock};
pub use compositor::Compositor;
pub use context::GpuContext;
pub use grain::GrainPass;
pub use resize::{resize_to_window, SurfaceExtent};
pub use scene::ScenePass;
pub use uniforms::{GrainUniforms, PlaneUniforms};
