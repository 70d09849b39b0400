//! Fixed palette table and the random palette generator.
//!
//! The table is a small excerpt of community five-color palettes; the
//! generator draws each of the five output colors independently and
//! uniformly from the whole table, so one draw can mix rows.

use rand::prelude::*;

/// Number of colors in a generated palette.
pub const PALETTE_LEN: usize = 5;

/// Source table, one row per curated palette, colors packed as 0xRRGGBB.
pub const PALETTE_TABLE: &[[u32; PALETTE_LEN]] = &[
    [0x69D2E7, 0xA7DBD8, 0xE0E4CC, 0xF38630, 0xFA6900],
    [0xFE4365, 0xFC9D9A, 0xF9CDAD, 0xC8C8A9, 0x83AF9B],
    [0xECD078, 0xD95B43, 0xC02942, 0x542437, 0x53777A],
    [0x556270, 0x4ECDC4, 0xC7F464, 0xFF6B6B, 0xC44D58],
    [0x774F38, 0xE08E79, 0xF1D4AF, 0xECE5CE, 0xC5E0DC],
    [0xE8DDCB, 0xCDB380, 0x036564, 0x033649, 0x031634],
    [0x490A3D, 0xBD1550, 0xE97F02, 0xF8CA00, 0x8A9B0F],
    [0x594F4F, 0x547980, 0x45ADA8, 0x9DE0AD, 0xE5FCC2],
    [0x00A0B0, 0x6A4A3C, 0xCC333F, 0xEB6841, 0xEDC951],
    [0xE94E77, 0xD68189, 0xC6A49A, 0xC6E5D9, 0xF4EAD5],
    [0x3FB8AF, 0x7FC7AF, 0xDAD8A7, 0xFF9E9D, 0xFF3D7F],
    [0xD9CEB2, 0x948C75, 0xD5DED9, 0x7A6A53, 0x99B2B7],
    [0xFFFFFF, 0xCBE86B, 0xF2E9E1, 0x1C140D, 0xCBE86B],
    [0xEFFFCD, 0xDCE9BE, 0x555152, 0x2E2633, 0x99173C],
    [0x343838, 0x005F6B, 0x008C9E, 0x00B4CC, 0x00DFFC],
    [0x413E4A, 0x73626E, 0xB38184, 0xF0B49E, 0xF7E4BE],
    [0xFF4E50, 0xFC913A, 0xF9D423, 0xEDE574, 0xE1F5C4],
    [0x99B898, 0xFECEA8, 0xFF847C, 0xE84A5F, 0x2A363B],
    [0x655643, 0x80BCA3, 0xF6F7BD, 0xE6AC27, 0xBF4D28],
    [0x00A8C6, 0x40C0CB, 0xF9F2E7, 0xAEE239, 0x8FBE00],
    [0x351330, 0x424254, 0x64908A, 0xE8CAA4, 0xCC2A41],
    [0x554236, 0xF77825, 0xD3CE3D, 0xF1EFA5, 0x60B99A],
    [0x5D4157, 0x838689, 0xA8CABA, 0xCAD7B2, 0xEBE3AA],
    [0x8C2318, 0x5E8C6A, 0x88A65E, 0xBFB35A, 0xF2C45A],
];

/// One color, linear RGB. Generated from the sRGB table entries so the
/// values can go straight into a shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Decodes a packed 0xRRGGBB sRGB value into linear RGB.
    pub fn from_srgb_u32(packed: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((packed >> shift) & 0xFF) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Gamma-encoded components for UI display.
    pub fn to_srgb(self) -> [f32; 3] {
        [
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        ]
    }

    /// Replaces this color from gamma-encoded components edited in the UI.
    pub fn set_srgb(&mut self, rgb: [f32; 3]) {
        self.r = srgb_to_linear(rgb[0]);
        self.g = srgb_to_linear(rgb[1]);
        self.b = srgb_to_linear(rgb[2]);
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// An ordered run of five colors driving the lava shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub colors: [Color; PALETTE_LEN],
}

impl Palette {
    /// Draws five colors, each picked independently and uniformly from a
    /// random row and column of [`PALETTE_TABLE`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let colors = std::array::from_fn(|_| {
            let row = &PALETTE_TABLE[rng.gen_range(0..PALETTE_TABLE.len())];
            Color::from_srgb_u32(row[rng.gen_range(0..PALETTE_LEN)])
        });
        Self { colors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn table_contains(color: Color) -> bool {
        PALETTE_TABLE
            .iter()
            .flatten()
            .any(|packed| Color::from_srgb_u32(*packed) == color)
    }

    #[test]
    fn random_palette_has_five_table_members() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let palette = Palette::random(&mut rng);
            assert_eq!(palette.colors.len(), PALETTE_LEN);
            for color in palette.colors {
                assert!(table_contains(color));
            }
        }
    }

    #[test]
    fn different_seeds_disagree() {
        let a = Palette::random(&mut StdRng::seed_from_u64(1));
        let b = Palette::random(&mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn regeneration_changes_at_least_one_entry() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut previous = Palette::random(&mut rng);
        let mut changed = 0;
        for _ in 0..20 {
            let next = Palette::random(&mut rng);
            if next != previous {
                changed += 1;
            }
            previous = next;
        }
        // 120 table colors and five independent draws; repeats are rare.
        assert!(changed >= 19);
    }

    #[test]
    fn srgb_round_trip_is_stable() {
        let color = Color::from_srgb_u32(0xE08E79);
        let mut copy = color;
        copy.set_srgb(color.to_srgb());
        assert!((copy.r - color.r).abs() < 1e-5);
        assert!((copy.g - color.g).abs() < 1e-5);
        assert!((copy.b - color.b).abs() < 1e-5);
    }
}
