//! Per-frame user input state.

use std::time::Instant;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Mouse buttons tracked by [`Input`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// Primary mouse button.
pub const MOUSE_LEFT: Button = Button::Left;

impl Button {
    fn from_winit(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Button::Left),
            MouseButton::Right => Some(Button::Right),
            MouseButton::Middle => Some(Button::Middle),
            _ => None,
        }
    }
}

/// Input state accumulated between frames.
///
/// The window driver feeds events in; the per-frame callback reads deltas
/// out. All deltas reset after each frame.
pub struct Input {
    last_frame: Instant,
    delta_time: f32,
    window_size: Vec2,
    cursor: Option<Vec2>,
    mouse_delta: Vec2,
    wheel_delta: f32,
    buttons: [bool; 3],
}

impl Input {
    pub(crate) fn new(width: f32, height: f32) -> Self {
        Input {
            last_frame: Instant::now(),
            delta_time: 0.0,
            window_size: Vec2::new(width.max(1.0), height.max(1.0)),
            cursor: None,
            mouse_delta: Vec2::ZERO,
            wheel_delta: 0.0,
            buttons: [false; 3],
        }
    }

    pub(crate) fn set_window_size(&mut self, width: f32, height: f32) {
        self.window_size = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Marks the start of a new frame and measures the time step.
    pub(crate) fn tick(&mut self) {
        let now = Instant::now();
        self.delta_time = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
    }

    pub(crate) fn window_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = Button::from_winit(button) {
                    self.mouse_input(button, state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse_wheel_moved(match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 20.0,
                });
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            _ => {}
        }
    }

    pub(crate) fn cursor_moved(&mut self, x: f32, y: f32) {
        let pos = Vec2::new(x, y);
        if let Some(previous) = self.cursor {
            let delta = pos - previous;
            // Pixel motion mapped into NDC units, y growing upwards.
            self.mouse_delta += Vec2::new(
                2.0 * delta.x / self.window_size.x,
                -2.0 * delta.y / self.window_size.y,
            );
        }
        self.cursor = Some(pos);
    }

    pub(crate) fn mouse_input(&mut self, button: Button, pressed: bool) {
        self.buttons[button as usize] = pressed;
    }

    pub(crate) fn mouse_wheel_moved(&mut self, lines: f32) {
        self.wheel_delta += lines;
    }

    pub(crate) fn reset_deltas(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.wheel_delta = 0.0;
    }

    /// Time since the previous frame, in seconds.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Cursor motion this frame in normalized device coordinate units.
    pub fn mouse_delta_ndc(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Scroll wheel motion this frame, in lines.
    pub fn mouse_wheel(&self) -> f32 {
        self.wheel_delta
    }

    /// Whether the given mouse button is currently held.
    pub fn hit(&self, button: Button) -> bool {
        self.buttons[button as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_motion_maps_to_ndc() {
        let mut input = Input::new(800.0, 600.0);
        input.cursor_moved(400.0, 300.0);
        input.cursor_moved(800.0, 0.0);

        assert_eq!(input.mouse_delta_ndc(), Vec2::new(1.0, 1.0));

        input.reset_deltas();
        assert_eq!(input.mouse_delta_ndc(), Vec2::ZERO);
    }

    #[test]
    fn first_cursor_sample_produces_no_delta() {
        let mut input = Input::new(800.0, 600.0);
        input.cursor_moved(123.0, 456.0);
        assert_eq!(input.mouse_delta_ndc(), Vec2::ZERO);
    }

    #[test]
    fn wheel_lines_accumulate() {
        let mut input = Input::new(800.0, 600.0);
        input.mouse_wheel_moved(1.5);
        input.mouse_wheel_moved(1.5);
        assert_eq!(input.mouse_wheel(), 3.0);

        input.reset_deltas();
        assert_eq!(input.mouse_wheel(), 0.0);
    }

    #[test]
    fn buttons_track_press_and_release() {
        let mut input = Input::new(800.0, 600.0);
        assert!(!input.hit(MOUSE_LEFT));
        input.mouse_input(Button::Left, true);
        assert!(input.hit(MOUSE_LEFT));
        assert!(!input.hit(Button::Right));
        input.mouse_input(Button::Left, false);
        assert!(!input.hit(MOUSE_LEFT));
    }
}
