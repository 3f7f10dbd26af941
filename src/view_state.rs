// view_state.rs: 当前视角与目标视角，逐帧指数平滑

use glam::{EulerRot, Quat, Vec3};

/// Zoom always settles at this rate; only look direction is user-tunable.
pub const FOV_SMOOTHING: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Radians, unbounded.
    pub yaw: f32,
    /// Radians, within `±pitch_limit`.
    pub pitch: f32,
}

/// Orientation plus vertical field of view in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSnapshot {
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
}

impl ViewSnapshot {
    pub fn centered(fov: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            fov,
        }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation {
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    /// Camera rotation, Y (yaw) then X (pitch), no roll.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Look direction for a camera whose rest pose faces -Z.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}

/// The rendered view and the goal it converges to.
///
/// Handlers only ever write `target`, and clamp it as they write;
/// `current` moves solely through [`ViewState::smoothing_step`] and the resets.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub current: ViewSnapshot,
    pub target: ViewSnapshot,
}

impl ViewState {
    pub fn new(fov: f32) -> Self {
        Self {
            current: ViewSnapshot::centered(fov),
            target: ViewSnapshot::centered(fov),
        }
    }

    /// Moves `current` a fraction of the way to `target`.
    /// `look_factor` applies to yaw/pitch and must lie in `(0, 1]`.
    pub fn smoothing_step(&mut self, look_factor: f32) {
        let c = &mut self.current;
        let t = &self.target;
        c.yaw += (t.yaw - c.yaw) * look_factor;
        c.pitch += (t.pitch - c.pitch) * look_factor;
        c.fov += (t.fov - c.fov) * FOV_SMOOTHING;
    }

    pub fn reset_view(&mut self, default_fov: f32) {
        self.current = ViewSnapshot::centered(default_fov);
        self.target = ViewSnapshot::centered(default_fov);
    }

    /// Pulls both pitches back inside `±limit` after the limit shrinks.
    pub fn clamp_pitch(&mut self, limit: f32) {
        self.target.pitch = self.target.pitch.clamp(-limit, limit);
        self.current.pitch = self.current.pitch.clamp(-limit, limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn half_factor_moves_halfway() {
        let mut view = ViewState::new(75.0);
        view.target.yaw = 1.0;
        view.smoothing_step(0.5);
        assert_relative_eq!(view.current.yaw, 0.5);
    }

    #[test]
    fn convergence_is_monotone_and_never_overshoots() {
        let mut view = ViewState::new(75.0);
        view.target.yaw = 1.0;
        view.target.pitch = -0.8;
        let mut last = view.current.yaw;
        for _ in 0..200 {
            view.smoothing_step(0.5);
            assert!(view.current.yaw >= last);
            assert!(view.current.yaw <= 1.0);
            assert!(view.current.pitch >= -0.8);
            last = view.current.yaw;
        }
        assert_relative_eq!(view.current.yaw, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn fov_uses_fixed_rate() {
        let mut view = ViewState::new(75.0);
        view.target.fov = 85.0;
        view.smoothing_step(1.0);
        assert_relative_eq!(view.current.fov, 78.0);
    }

    #[test]
    fn unit_factor_snaps() {
        let mut view = ViewState::new(75.0);
        view.target.yaw = 2.0;
        view.target.pitch = 0.3;
        view.smoothing_step(1.0);
        assert_eq!(view.current.orientation(), view.target.orientation());
    }

    #[test]
    fn reset_recentres_both() {
        let mut view = ViewState::new(75.0);
        view.target = ViewSnapshot { yaw: 1.0, pitch: 0.2, fov: 90.0 };
        view.smoothing_step(0.5);
        view.reset_view(60.0);
        assert_eq!(view.current, ViewSnapshot::centered(60.0));
        assert_eq!(view.target, ViewSnapshot::centered(60.0));
    }

    #[test]
    fn clamp_pitch_shrinks_both() {
        let mut view = ViewState::new(75.0);
        view.current.pitch = 1.2;
        view.target.pitch = -1.3;
        view.clamp_pitch(1.0);
        assert_eq!(view.current.pitch, 1.0);
        assert_eq!(view.target.pitch, -1.0);
    }

    #[test]
    fn forward_at_rest_faces_negative_z() {
        let f = ViewSnapshot::centered(75.0).forward();
        assert_relative_eq!(f.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(f.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(f.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn forward_follows_yaw_and_pitch() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let f = ViewSnapshot { yaw: quarter, pitch: 0.0, fov: 75.0 }.forward();
        assert_relative_eq!(f.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(f.z, 0.0, epsilon = 1e-6);

        let f = ViewSnapshot { yaw: 0.0, pitch: 0.5, fov: 75.0 }.forward();
        assert_relative_eq!(f.y, 0.5f32.sin(), epsilon = 1e-6);
        assert_relative_eq!(f.length(), 1.0, epsilon = 1e-6);
    }
}
