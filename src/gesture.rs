// gesture.rs: 拖拽、滑动切图与双指缩放的识别

use glam::Vec2;
use log::{debug, trace};

use crate::config::Config;
use crate::view_state::ViewSnapshot;

/// Radians of look rotation per pixel of drag at sensitivity 1.0.
pub const DRAG_RAD_PER_PX: f32 = 0.003;
/// A swipe must travel strictly more than this many pixels...
pub const SWIPE_MIN_DISTANCE: f32 = 100.0;
/// ...in strictly less than this many milliseconds.
pub const SWIPE_MAX_DURATION_MS: u64 = 300;
/// Degrees of fov per unit of wheel delta.
pub const WHEEL_FOV_PER_UNIT: f32 = 0.05;

/// Navigation intent of a quick horizontal flick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved right: previous image.
    Prev,
    /// Finger moved left: next image.
    Next,
}

#[derive(Debug, Clone, Copy)]
struct PointerSession {
    last: Vec2,
    start_x: f32,
    start_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct PinchSession {
    initial_distance: f32,
    initial_fov: f32,
}

/// Turns pointer and two-finger touch streams into target updates.
///
/// At most one of the drag and pinch sessions is open at any time.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    pointer: Option<PointerSession>,
    pinch: Option<PinchSession>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    pub fn on_pointer_down(&mut self, pos: Vec2, timestamp_ms: u64) {
        self.pinch = None;
        if !pos.is_finite() {
            trace!("ignoring pointer down at {pos}");
            self.pointer = None;
            return;
        }
        self.pointer = Some(PointerSession {
            last: pos,
            start_x: pos.x,
            start_ms: timestamp_ms,
        });
    }

    pub fn on_pointer_move(&mut self, pos: Vec2, target: &mut ViewSnapshot, config: &Config) {
        let Some(session) = self.pointer.as_mut() else {
            trace!("pointer move without an active drag");
            return;
        };
        // 坏坐标不更新 last，下一次有效移动仍从上一个有效点算起
        if !pos.is_finite() {
            trace!("ignoring pointer move to {pos}");
            return;
        }

        let delta = pos - session.last;
        let sensitivity = DRAG_RAD_PER_PX * config.drag_sensitivity;
        let invert = if config.invert_drag { -1.0 } else { 1.0 };

        // 向右拖 yaw 增加，向下拖 pitch 增加
        target.yaw += delta.x * sensitivity * invert;
        let limit = config.pitch_limit_rad();
        target.pitch = (target.pitch + delta.y * sensitivity * invert).clamp(-limit, limit);

        session.last = pos;
    }

    /// Closes the drag and reports a swipe if the flick was long and quick enough.
    pub fn on_pointer_up(&mut self, x: f32, timestamp_ms: u64) -> Option<Swipe> {
        let Some(session) = self.pointer.take() else {
            trace!("pointer up without an active drag");
            return None;
        };

        let distance = x - session.start_x;
        let duration = timestamp_ms.saturating_sub(session.start_ms);
        if distance.abs() > SWIPE_MIN_DISTANCE && duration < SWIPE_MAX_DURATION_MS {
            let swipe = if distance > 0.0 { Swipe::Prev } else { Swipe::Next };
            debug!("swipe {swipe:?}: {distance:.0}px in {duration}ms");
            Some(swipe)
        } else {
            None
        }
    }

    /// Pointer left the surface: drop the drag without evaluating a swipe.
    pub fn on_pointer_cancel(&mut self) {
        self.pointer = None;
    }

    pub fn on_pinch_start(&mut self, a: Vec2, b: Vec2, current_fov: f32) {
        self.pointer = None;
        let distance = a.distance(b);
        if !(distance.is_finite() && distance > 0.0) {
            trace!("ignoring degenerate pinch start ({distance})");
            self.pinch = None;
            return;
        }
        self.pinch = Some(PinchSession {
            initial_distance: distance,
            initial_fov: current_fov,
        });
    }

    /// Spreading the fingers shrinks the fov (zoom in); pinching widens it.
    pub fn on_pinch_move(&mut self, a: Vec2, b: Vec2, target: &mut ViewSnapshot, config: &Config) {
        let Some(session) = self.pinch else {
            trace!("pinch move without an active pinch");
            return;
        };
        let distance = a.distance(b);
        if !(distance.is_finite() && distance > 0.0) {
            return;
        }
        let scale = session.initial_distance / distance;
        target.fov = config.clamp_fov(session.initial_fov * scale);
    }

    pub fn on_pinch_end(&mut self) {
        self.pinch = None;
    }

    pub fn on_wheel(&mut self, delta_y: f32, target: &mut ViewSnapshot, config: &Config) {
        if !delta_y.is_finite() {
            return;
        }
        target.fov = config.clamp_fov(target.fov + delta_y * WHEEL_FOV_PER_UNIT);
    }
}
