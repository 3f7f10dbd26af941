// controller.rs: 输入事件 -> 目标视角 -> 逐帧平滑后的相机参数

use glam::Vec2;
use log::info;

use crate::config::Config;
use crate::gesture::{GestureClassifier, Swipe};
use crate::gyro::{GyroPermission, GyroState, GyroscopeCalibrator, OrientationSample};
use crate::navigator::Navigator;
use crate::view_state::{ViewSnapshot, ViewState};

/// While the gyroscope drives the view, look smoothing runs at this
/// fraction of the configured rate. The default smoothness of 50 gives
/// 0.5 for drag and 0.2 for gyro.
pub const GYRO_SMOOTHING_SCALE: f32 = 0.4;

/// What [`Controller::toggle_gyro`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GyroToggle {
    Enabled,
    Disabled,
    PermissionDenied,
    Unsupported,
}

/// Owns the whole view state and turns input feeds into camera parameters.
///
/// Every method runs to completion on the caller's thread. Malformed or
/// out-of-order input is dropped and leaves the state as it was.
pub struct Controller<N> {
    config: Config,
    view: ViewState,
    gestures: GestureClassifier,
    gyro: GyroscopeCalibrator,
    navigator: N,
}

impl<N: Navigator> Controller<N> {
    /// `config` must already be validated.
    pub fn new(config: Config, navigator: N) -> Self {
        Self {
            view: ViewState::new(config.fov),
            config,
            gestures: GestureClassifier::new(),
            gyro: GyroscopeCalibrator::new(),
            navigator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn gyro(&self) -> &GyroscopeCalibrator {
        &self.gyro
    }

    pub fn gestures(&self) -> &GestureClassifier {
        &self.gestures
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// Replaces the settings. Pitch and fov are pulled back inside the new
    /// limits; the default fov is retargeted unless the gyroscope is on.
    pub fn apply_config(&mut self, config: Config) {
        self.config = config;
        self.view.clamp_pitch(config.pitch_limit_rad());
        self.view.current.fov = config.clamp_fov(self.view.current.fov);
        self.view.target.fov = if self.gyro.is_enabled() {
            config.clamp_fov(self.view.target.fov)
        } else {
            config.fov
        };
    }

    /// Recentres on the configured default fov, e.g. after a new panorama loads.
    pub fn reset_view(&mut self) {
        self.view.reset_view(self.config.fov);
    }

    pub fn feed_pointer_down(&mut self, x: f32, y: f32, timestamp_ms: u64) {
        self.gestures.on_pointer_down(Vec2::new(x, y), timestamp_ms);
    }

    pub fn feed_pointer_move(&mut self, x: f32, y: f32) {
        self.gestures.on_pointer_move(Vec2::new(x, y), &mut self.view.target, &self.config);
    }

    /// Ends a drag; a recognised swipe goes to the navigator and is returned.
    pub fn feed_pointer_up(&mut self, x: f32, timestamp_ms: u64) -> Option<Swipe> {
        let swipe = self.gestures.on_pointer_up(x, timestamp_ms)?;
        self.navigator.navigate(swipe);
        Some(swipe)
    }

    /// Pointer left the surface mid-drag.
    pub fn feed_pointer_cancel(&mut self) {
        self.gestures.on_pointer_cancel();
    }

    pub fn feed_pinch_start(&mut self, a: Vec2, b: Vec2) {
        self.gestures.on_pinch_start(a, b, self.view.current.fov);
    }

    pub fn feed_pinch_move(&mut self, a: Vec2, b: Vec2) {
        self.gestures.on_pinch_move(a, b, &mut self.view.target, &self.config);
    }

    pub fn feed_pinch_end(&mut self) {
        self.gestures.on_pinch_end();
    }

    pub fn feed_wheel(&mut self, delta_y: f32) {
        self.gestures.on_wheel(delta_y, &mut self.view.target, &self.config);
    }

    pub fn feed_orientation_sample(&mut self, sample: OrientationSample) {
        self.gyro.on_sample(sample, &mut self.view.target, &self.config);
    }

    /// Only call once the platform has granted orientation access.
    pub fn enable_gyro(&mut self) {
        self.gyro.enable(self.view.current.orientation());
    }

    /// Returns `true` if this call turned tracking off.
    pub fn disable_gyro(&mut self) -> bool {
        self.gyro.disable()
    }

    /// Recentres the view and re-anchors the next orientation sample to it.
    pub fn recalibrate_gyro(&mut self) {
        self.gyro.recalibrate();
        self.view.reset_view(self.config.fov);
    }

    /// Flips gyroscope tracking. Turning it on needs `permission` from the
    /// platform query; turning it off ignores it.
    pub fn toggle_gyro(&mut self, permission: GyroPermission) -> GyroToggle {
        if self.gyro.is_enabled() {
            self.disable_gyro();
            return GyroToggle::Disabled;
        }
        match permission {
            GyroPermission::Granted => {
                self.enable_gyro();
                GyroToggle::Enabled
            }
            GyroPermission::Denied => {
                info!("orientation permission denied");
                GyroToggle::PermissionDenied
            }
            GyroPermission::Unavailable => {
                info!("device orientation is not supported here");
                GyroToggle::Unsupported
            }
        }
    }

    /// Look smoothing factor for the active input mode.
    pub fn look_factor(&self) -> f32 {
        let base = self.config.smoothing_factor();
        match self.gyro.state() {
            GyroState::Disabled => base,
            _ => base * GYRO_SMOOTHING_SCALE,
        }
    }

    /// Advances one frame and returns what the renderer should show.
    pub fn tick(&mut self) -> ViewSnapshot {
        self.view.smoothing_step(self.look_factor());
        self.view.current
    }
}

impl<N> std::fmt::Debug for Controller<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.config)
            .field("view", &self.view)
            .field("gestures", &self.gestures)
            .field("gyro", &self.gyro)
            .finish_non_exhaustive()
    }
}
