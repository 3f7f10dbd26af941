// gyro.rs: 陀螺仪校准与方向映射
//
// alpha: 罗盘方向 0-360°，beta: 前后倾斜 -180-180°，gamma: 左右倾斜（不参与映射）

use log::{debug, trace};

use crate::angle::{deg_to_rad, wrap_degrees_180};
use crate::config::Config;
use crate::view_state::{Orientation, ViewSnapshot};

/// One device-orientation reading in degrees. Fields are `None` until
/// the platform starts delivering data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationSample {
    pub alpha: Option<f32>,
    pub beta: Option<f32>,
    pub gamma: Option<f32>,
}

impl OrientationSample {
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    fn angles(&self) -> Option<(f32, f32)> {
        match (self.alpha, self.beta) {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((a, b)),
            _ => None,
        }
    }
}

/// Result of the platform's orientation permission/capability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GyroPermission {
    Granted,
    Denied,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GyroState {
    Disabled,
    /// Listening, waiting for the first valid sample to set the baseline.
    Enabling,
    /// Baseline captured from the first sample.
    Calibrated,
    /// Following the device.
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GyroCalibration {
    pub calibrated: bool,
    /// Degrees.
    pub base_alpha: f32,
    /// Degrees.
    pub base_beta: f32,
    /// Radians.
    pub base_yaw: f32,
    /// Radians.
    pub base_pitch: f32,
}

/// Maps device orientation onto the target view, relative to the reading
/// and the on-screen orientation captured when tracking started.
#[derive(Debug, Clone)]
pub struct GyroscopeCalibrator {
    state: GyroState,
    calibration: GyroCalibration,
}

impl Default for GyroscopeCalibrator {
    fn default() -> Self {
        Self {
            state: GyroState::Disabled,
            calibration: GyroCalibration::default(),
        }
    }
}

impl GyroscopeCalibrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GyroState {
        self.state
    }

    pub fn calibration(&self) -> &GyroCalibration {
        &self.calibration
    }

    pub fn is_enabled(&self) -> bool {
        self.state != GyroState::Disabled
    }

    /// Starts tracking from `current`; the next valid sample becomes the baseline.
    pub fn enable(&mut self, current: Orientation) {
        self.calibration.base_yaw = current.yaw;
        self.calibration.base_pitch = current.pitch;
        self.calibration.calibrated = false;
        self.state = GyroState::Enabling;
        debug!(
            "gyroscope enabled at yaw={:.3} pitch={:.3}",
            current.yaw, current.pitch
        );
    }

    /// Feeds one reading. Returns `true` if the target was written.
    pub fn on_sample(
        &mut self,
        sample: OrientationSample,
        target: &mut ViewSnapshot,
        config: &Config,
    ) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let Some((alpha, beta)) = sample.angles() else {
            trace!("ignoring incomplete orientation sample {sample:?}");
            return false;
        };

        if !self.calibration.calibrated {
            self.calibration.base_alpha = alpha;
            self.calibration.base_beta = beta;
            self.calibration.calibrated = true;
            self.state = GyroState::Calibrated;
            debug!("gyroscope calibrated: alpha={alpha} beta={beta} gamma={:?}", sample.gamma);
            return false;
        }

        let alpha_delta = wrap_degrees_180(alpha - self.calibration.base_alpha);
        let beta_delta = beta - self.calibration.base_beta;

        let sensitivity = config.gyro_sensitivity;
        let invert = if config.invert_gyro { -1.0 } else { 1.0 };
        let yaw_delta = deg_to_rad(alpha_delta) * sensitivity * invert;
        let pitch_delta = deg_to_rad(beta_delta) * sensitivity * invert;

        // 设备前倾（beta 增大）应当向下看，所以 pitch 取反
        let limit = config.pitch_limit_rad();
        target.yaw = self.calibration.base_yaw + yaw_delta;
        target.pitch = (self.calibration.base_pitch - pitch_delta).clamp(-limit, limit);
        self.state = GyroState::Active;
        true
    }

    /// Forgets the device baseline and anchors the next sample to a centred view.
    /// The caller recentres the view itself.
    pub fn recalibrate(&mut self) {
        self.calibration.calibrated = false;
        self.calibration.base_yaw = 0.0;
        self.calibration.base_pitch = 0.0;
        if self.is_enabled() {
            self.state = GyroState::Enabling;
        }
        debug!("gyroscope recalibration requested");
    }

    /// Stops tracking. Returns `true` only on the call that actually
    /// unsubscribed, so callers tear down their listener exactly once.
    pub fn disable(&mut self) -> bool {
        self.calibration.calibrated = false;
        if self.state == GyroState::Disabled {
            return false;
        }
        self.state = GyroState::Disabled;
        debug!("gyroscope disabled");
        true
    }
}
