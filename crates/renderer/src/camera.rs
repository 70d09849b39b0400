use glam::{Mat4, Vec3};

/// Perspective camera. Aspect is the only field the render loop touches;
/// it is recomputed whenever the resize adapter reports a size change.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y: 50.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_proj(&self, eye: Vec3, target: Vec3) -> Mat4 {
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect.max(1e-3), self.near, self.far);
        proj * view
    }
}

/// Orbit controls with velocity damping.
///
/// End-user interaction is disabled by default, matching the viewer's
/// fixed framing, but `update` still runs every frame so residual
/// velocity keeps converging if interaction is re-enabled.
#[derive(Debug, Clone, Copy)]
pub struct OrbitControls {
    pub enabled: bool,
    pub damping: f32,
    pub sensitivity: f32,
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl OrbitControls {
    /// Builds controls orbiting `target` from the given eye position.
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(1e-4);
        Self {
            enabled: false,
            damping: 0.05,
            sensitivity: 0.005,
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.target
            + self.distance
                * Vec3::new(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                )
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Feeds a pointer drag into the velocity state. Ignored while the
    /// controls are disabled.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if !self.enabled {
            return;
        }
        self.yaw_velocity -= dx * self.sensitivity;
        self.pitch_velocity -= dy * self.sensitivity;
    }

    /// One damping step: apply residual velocity, then decay it.
    pub fn update(&mut self) {
        self.yaw += self.yaw_velocity;
        let lim = std::f32::consts::FRAC_PI_2 - 0.017;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-lim, lim);

        let retain = 1.0 - self.damping;
        self.yaw_velocity *= retain;
        self.pitch_velocity *= retain;
        if self.yaw_velocity.abs() < 1e-6 {
            self.yaw_velocity = 0.0;
        }
        if self.pitch_velocity.abs() < 1e-6 {
            self.pitch_velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_eye_round_trips_eye_position() {
        let eye = Vec3::new(-0.2, 0.0, 2.0);
        let controls = OrbitControls::from_eye(eye, Vec3::ZERO);
        assert!((controls.eye() - eye).length() < 1e-4);
    }

    #[test]
    fn update_without_velocity_is_a_no_op() {
        let mut controls = OrbitControls::from_eye(Vec3::new(-0.2, 0.0, 2.0), Vec3::ZERO);
        let before = controls.eye();
        for _ in 0..100 {
            controls.update();
        }
        assert!((controls.eye() - before).length() < 1e-6);
    }

    #[test]
    fn damping_converges_after_a_drag() {
        let mut controls = OrbitControls::from_eye(Vec3::new(-0.2, 0.0, 2.0), Vec3::ZERO);
        controls.enabled = true;
        controls.rotate(40.0, 10.0);
        for _ in 0..2000 {
            controls.update();
        }
        assert_eq!(controls.yaw_velocity, 0.0);
        assert_eq!(controls.pitch_velocity, 0.0);
        let settled = controls.eye();
        controls.update();
        assert!((controls.eye() - settled).length() < 1e-6);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut controls = OrbitControls::from_eye(Vec3::new(-0.2, 0.0, 2.0), Vec3::ZERO);
        let before = controls.eye();
        controls.rotate(100.0, 100.0);
        controls.update();
        assert!((controls.eye() - before).length() < 1e-6);
    }

    #[test]
    fn aspect_update_changes_projection() {
        let mut camera = Camera::default();
        let eye = Vec3::new(-0.2, 0.0, 2.0);
        let wide = camera.view_proj(eye, Vec3::ZERO);
        camera.set_aspect(800, 1200);
        let tall = camera.view_proj(eye, Vec3::ZERO);
        assert_ne!(wide, tall);
        assert!(!tall.col(0).x.is_nan());
    }
}
