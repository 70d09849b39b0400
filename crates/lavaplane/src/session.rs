use glam::Vec3;
use palette_table::Palette;
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::{Camera, OrbitControls, SimClock};

/// Camera framing matching the viewer's fixed composition.
const EYE: Vec3 = Vec3::new(-0.2, 0.0, 2.0);

/// Mutable viewer state shared between the render loop and the debug
/// panel. Everything the panel edits lives either here or on the
/// compositor's pass uniforms.
pub struct Session {
    pub clock: SimClock,
    pub camera: Camera,
    pub controls: OrbitControls,
    /// Animation speed multiplier, panel-adjustable in [0, 5].
    pub speed: f32,
    pub palette: Palette,
    rng: StdRng,
}

impl Session {
    pub fn new(speed: f32) -> Self {
        let mut rng = StdRng::from_entropy();
        let palette = Palette::random(&mut rng);
        Self {
            clock: SimClock::new(),
            camera: Camera::default(),
            controls: OrbitControls::from_eye(EYE, Vec3::ZERO),
            speed,
            palette,
            rng,
        }
    }

    /// Draws a fresh palette; the caller pushes it into the scene uniforms.
    pub fn regenerate_palette(&mut self) {
        self.palette = Palette::random(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_at_time_zero() {
        let session = Session::new(0.5);
        assert_eq!(session.clock.time(), 0.0);
        assert_eq!(session.speed, 0.5);
        assert!(!session.controls.enabled);
    }

    #[test]
    fn regenerate_replaces_the_palette() {
        let mut session = Session::new(0.5);
        let mut changed = false;
        // Collisions on all five entries across ten draws are implausible.
        for _ in 0..10 {
            let before = session.palette;
            session.regenerate_palette();
            if session.palette.colors != before.colors {
                changed = true;
                break;
            }
        }
        assert!(changed);
    }
}
