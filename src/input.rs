// input.rs: winit 窗口事件 -> 控制器输入

use std::time::Instant;

use glam::Vec2;
use winit::event::{
    ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent,
};

use crate::controller::Controller;
use crate::navigator::Navigator;

/// Pixels per wheel notch when the platform reports lines.
pub const WHEEL_LINE_PX: f32 = 100.0;

/// Tracks cursor and touch points so raw window events can be replayed
/// into a [`Controller`] as pointer, pinch and wheel feeds.
pub struct InputHandler {
    epoch: Instant,
    cursor: Vec2,
    mouse_down: bool,
    touches: Vec<(u64, Vec2)>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl InputHandler {
    /// `epoch` is time zero for the millisecond timestamps the controller sees.
    pub fn new(epoch: Instant) -> Self {
        Self {
            epoch,
            cursor: Vec2::ZERO,
            mouse_down: false,
            touches: Vec::new(),
        }
    }

    fn millis(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.epoch).as_millis() as u64
    }

    /// Returns true if the event was consumed.
    pub fn handle_event<N: Navigator>(
        &mut self,
        controller: &mut Controller<N>,
        event: &WindowEvent<'_>,
        now: Instant,
    ) -> bool {
        match event {
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let t = self.millis(now);
                match state {
                    ElementState::Pressed => {
                        self.mouse_down = true;
                        controller.feed_pointer_down(self.cursor.x, self.cursor.y, t);
                    }
                    ElementState::Released => {
                        if self.mouse_down {
                            self.mouse_down = false;
                            controller.feed_pointer_up(self.cursor.x, t);
                        }
                    }
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                if self.mouse_down {
                    controller.feed_pointer_move(self.cursor.x, self.cursor.y);
                }
                true
            }
            WindowEvent::CursorLeft { .. } => {
                if self.mouse_down {
                    self.mouse_down = false;
                    controller.feed_pointer_cancel();
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit: 正值表示向上滚动；浏览器 deltaY 向下为正
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -*y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                controller.feed_wheel(delta_y);
                true
            }
            WindowEvent::Touch(touch) => {
                self.handle_touch(controller, touch, now);
                true
            }
            _ => false,
        }
    }

    fn handle_touch<N: Navigator>(
        &mut self,
        controller: &mut Controller<N>,
        touch: &Touch,
        now: Instant,
    ) {
        let pos = Vec2::new(touch.location.x as f32, touch.location.y as f32);
        let t = self.millis(now);

        match touch.phase {
            TouchPhase::Started => {
                self.touches.push((touch.id, pos));
                match self.touches.len() {
                    1 => controller.feed_pointer_down(pos.x, pos.y, t),
                    2 => controller.feed_pinch_start(self.touches[0].1, self.touches[1].1),
                    _ => {}
                }
            }
            TouchPhase::Moved => {
                let Some(slot) = self.touches.iter_mut().find(|(id, _)| *id == touch.id) else {
                    return;
                };
                slot.1 = pos;
                match self.touches.len() {
                    1 => controller.feed_pointer_move(pos.x, pos.y),
                    2 => controller.feed_pinch_move(self.touches[0].1, self.touches[1].1),
                    _ => {}
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let before = self.touches.len();
                self.touches.retain(|(id, _)| *id != touch.id);
                if self.touches.len() == before {
                    return;
                }
                match (before, touch.phase) {
                    (1, TouchPhase::Ended) => {
                        controller.feed_pointer_up(pos.x, t);
                    }
                    (1, _) => controller.feed_pointer_cancel(),
                    // 剩下一根手指不会接着拖拽
                    (2, _) => controller.feed_pinch_end(),
                    _ => controller.feed_pinch_start(self.touches[0].1, self.touches[1].1),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::navigator::Gallery;
    use std::time::Duration;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, ModifiersState};

    fn device() -> DeviceId {
        // SAFETY: only stored in synthetic events, never handed to a platform call.
        unsafe { DeviceId::dummy() }
    }

    fn touch(id: u64, phase: TouchPhase, x: f64, y: f64) -> WindowEvent<'static> {
        WindowEvent::Touch(Touch {
            device_id: device(),
            phase,
            location: PhysicalPosition::new(x, y),
            force: None,
            id,
        })
    }

    fn setup() -> (InputHandler, Controller<Gallery<u32>>, Instant) {
        let epoch = Instant::now();
        let controller = Controller::new(Config::default(), Gallery::new(vec![1, 2, 3]));
        (InputHandler::new(epoch), controller, epoch)
    }

    #[test]
    fn quick_touch_flick_switches_image() {
        let (mut input, mut c, epoch) = setup();
        input.handle_event(&mut c, &touch(7, TouchPhase::Started, 500.0, 300.0), epoch);
        let later = epoch + Duration::from_millis(150);
        input.handle_event(&mut c, &touch(7, TouchPhase::Moved, 380.0, 300.0), later);
        input.handle_event(&mut c, &touch(7, TouchPhase::Ended, 380.0, 300.0), later);
        assert_eq!(c.navigator().current(), Some(&2));
    }

    #[test]
    fn cancelled_touch_never_swipes() {
        let (mut input, mut c, epoch) = setup();
        input.handle_event(&mut c, &touch(1, TouchPhase::Started, 500.0, 0.0), epoch);
        input.handle_event(&mut c, &touch(1, TouchPhase::Cancelled, 100.0, 0.0), epoch);
        assert_eq!(c.navigator().current(), Some(&1));
        assert!(!c.gestures().is_dragging());
    }

    #[test]
    fn second_finger_turns_drag_into_pinch() {
        let (mut input, mut c, epoch) = setup();
        input.handle_event(&mut c, &touch(1, TouchPhase::Started, 0.0, 0.0), epoch);
        assert!(c.gestures().is_dragging());
        input.handle_event(&mut c, &touch(2, TouchPhase::Started, 200.0, 0.0), epoch);
        assert!(c.gestures().is_pinching());
        assert!(!c.gestures().is_dragging());

        input.handle_event(&mut c, &touch(2, TouchPhase::Moved, 100.0, 0.0), epoch);
        assert_eq!(c.view().target.fov, 100.0);

        input.handle_event(&mut c, &touch(2, TouchPhase::Ended, 100.0, 0.0), epoch);
        assert!(!c.gestures().is_pinching());
        // the remaining finger does not resume dragging
        input.handle_event(&mut c, &touch(1, TouchPhase::Moved, 50.0, 50.0), epoch);
        assert_eq!(c.view().target.yaw, 0.0);
    }

    #[test]
    #[allow(deprecated)]
    fn mouse_drag_and_leave() {
        let (mut input, mut c, epoch) = setup();
        let moved = |x: f64, y: f64| WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
            modifiers: ModifiersState::empty(),
        };
        let button = |state| WindowEvent::MouseInput {
            device_id: device(),
            state,
            button: MouseButton::Left,
            modifiers: ModifiersState::empty(),
        };

        input.handle_event(&mut c, &moved(10.0, 10.0), epoch);
        input.handle_event(&mut c, &button(ElementState::Pressed), epoch);
        input.handle_event(&mut c, &moved(20.0, 10.0), epoch);
        assert!((c.view().target.yaw - 0.03).abs() < 1e-6);

        let left = WindowEvent::CursorLeft { device_id: device() };
        input.handle_event(&mut c, &left, epoch);
        assert!(!c.gestures().is_dragging());
        input.handle_event(&mut c, &button(ElementState::Released), epoch);
        assert_eq!(c.navigator().current(), Some(&1));
    }

    #[test]
    #[allow(deprecated)]
    fn wheel_down_zooms_out() {
        let (mut input, mut c, epoch) = setup();
        let wheel = WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::LineDelta(0.0, -1.0),
            phase: TouchPhase::Moved,
            modifiers: ModifiersState::empty(),
        };
        assert!(input.handle_event(&mut c, &wheel, epoch));
        assert!((c.view().target.fov - 80.0).abs() < 1e-4);
    }

    #[test]
    fn unrelated_events_pass_through() {
        let (mut input, mut c, epoch) = setup();
        assert!(!input.handle_event(&mut c, &WindowEvent::CloseRequested, epoch));
    }
}
