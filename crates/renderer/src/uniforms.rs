//! CPU-side mirrors of the shader uniform blocks.
//!
//! Layouts must observe std140-style alignment so `bytemuck` can copy them
//! straight into the GPU buffers. Setters write whole slots; in particular
//! [`PlaneUniforms::set_palette`] installs all five colors in one call so a
//! half-updated palette never reaches the shader.

use bytemuck::{Pod, Zeroable};
use palette_table::{Palette, PALETTE_LEN};

/// Uniform block driving the displaced-plane material.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub struct PlaneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub palette: [[f32; 4]; PALETTE_LEN],
    pub noise_coord: [f32; 2],
    pub noise_elevation: f32,
    pub time: f32,
}

unsafe impl Zeroable for PlaneUniforms {}
unsafe impl Pod for PlaneUniforms {}

impl PlaneUniforms {
    pub fn new(palette: &Palette) -> Self {
        let mut uniforms = Self {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            palette: [[0.0; 4]; PALETTE_LEN],
            noise_coord: [2.0, 2.6],
            noise_elevation: 3.0,
            time: 0.0,
        };
        uniforms.set_palette(palette);
        uniforms
    }

    pub fn set_view_proj(&mut self, view_proj: glam::Mat4) {
        self.view_proj = view_proj.to_cols_array_2d();
    }

    /// Swaps the whole five-color run; the fourth lane stays padding.
    pub fn set_palette(&mut self, palette: &Palette) {
        for (slot, color) in self.palette.iter_mut().zip(palette.colors.iter()) {
            *slot = [color.r, color.g, color.b, 0.0];
        }
    }
}

/// Uniform block for the grain post pass. The pass keeps its own time
/// slot; the render loop copies the simulation clock into it each frame.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub struct GrainUniforms {
    pub size: f32,
    pub strength: f32,
    pub saturation: f32,
    pub time: f32,
}

unsafe impl Zeroable for GrainUniforms {}
unsafe impl Pod for GrainUniforms {}

impl Default for GrainUniforms {
    fn default() -> Self {
        Self {
            size: 250.0,
            strength: 0.05,
            saturation: 1.0,
            time: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_table::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn uniform_blocks_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<PlaneUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<GrainUniforms>() % 16, 0);
    }

    #[test]
    fn plane_block_matches_wgsl_offsets() {
        assert_eq!(std::mem::offset_of!(PlaneUniforms, palette), 64);
        assert_eq!(std::mem::offset_of!(PlaneUniforms, noise_coord), 144);
        assert_eq!(std::mem::offset_of!(PlaneUniforms, noise_elevation), 152);
        assert_eq!(std::mem::offset_of!(PlaneUniforms, time), 156);
        assert_eq!(std::mem::size_of::<PlaneUniforms>(), 160);
    }

    #[test]
    fn set_palette_writes_every_slot() {
        let mut rng = StdRng::seed_from_u64(3);
        let first = Palette::random(&mut rng);
        let mut uniforms = PlaneUniforms::new(&first);

        let replacement = Palette {
            colors: [Color { r: 0.5, g: 0.25, b: 0.125 }; PALETTE_LEN],
        };
        uniforms.set_palette(&replacement);
        for slot in uniforms.palette {
            assert_eq!(slot, [0.5, 0.25, 0.125, 0.0]);
        }
    }
}
