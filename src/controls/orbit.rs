use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::input::{Button, Input, MOUSE_LEFT};
use crate::object::{Base, Object};

const MIN_DISTANCE: f32 = 0.2;
const DOLLY_STEP: f32 = 0.1;

/// Simple controls for an orbital camera.
///
/// The camera rotates around a fixed target point. By default it uses the
/// left mouse button as the control button (hold it to rotate) and the mouse
/// wheel to adjust the distance to the target. Rotation keeps a slight
/// inertia after the drag ends, bled off by damping.
#[derive(Clone, Debug)]
pub struct Orbit {
    object: Base,
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    button: Button,
    speed: f32,
    damping: f32,
}

/// Helper struct to construct [`Orbit`] with desired settings.
#[derive(Clone, Debug)]
pub struct Builder {
    object: Base,
    position: Vec3,
    target: Vec3,
    button: Button,
    speed: f32,
    damping: f32,
}

impl Builder {
    /// Create new `Builder` with default values.
    pub fn new<T: Object>(object: &T) -> Self {
        Builder {
            object: object.upcast(),
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            button: MOUSE_LEFT,
            speed: 1.0,
            damping: 0.1,
        }
    }

    /// Set the initial position.
    ///
    /// Defaults to the world origin.
    pub fn position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Set the target position.
    ///
    /// Defaults to the world origin.
    pub fn target(&mut self, target: Vec3) -> &mut Self {
        self.target = target;
        self
    }

    /// Setup the speed of the movements. Default value is 1.0
    pub fn speed(&mut self, speed: f32) -> &mut Self {
        self.speed = speed;
        self
    }

    /// Setup control button. Default is left mouse button (`MOUSE_LEFT`).
    pub fn button(&mut self, button: Button) -> &mut Self {
        self.button = button;
        self
    }

    /// Setup the per-frame rotational damping factor in `0..1`.
    ///
    /// Defaults to 0.1; higher values stop the orbit faster after a drag.
    pub fn damping(&mut self, damping: f32) -> &mut Self {
        self.damping = damping.clamp(0.0, 1.0);
        self
    }

    /// Finalize builder and create new `Orbit`.
    pub fn build(&mut self) -> Orbit {
        let offset = self.position - self.target;
        let distance = offset.length().max(MIN_DISTANCE);
        let mut orbit = Orbit {
            object: self.object.clone(),
            target: self.target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            button: self.button,
            speed: self.speed,
            damping: self.damping,
        };
        orbit.place();
        orbit
    }
}

impl Orbit {
    /// Create new `Builder` with default values.
    pub fn builder<T: Object>(object: &T) -> Builder {
        Builder::new(object)
    }

    /// Update current position and rotation of the controlled object
    /// according to the last frame input.
    pub fn update(&mut self, input: &Input) {
        if input.hit(self.button) {
            let delta = input.mouse_delta_ndc();
            self.yaw_velocity -= self.speed * delta.x;
            self.pitch_velocity -= self.speed * delta.y;
        }

        let wheel = input.mouse_wheel();
        if wheel.abs() > 1e-6 {
            self.distance = (self.distance * (1.0 - wheel * DOLLY_STEP)).max(MIN_DISTANCE);
        }

        if self.yaw_velocity.abs() < 1e-6 && self.pitch_velocity.abs() < 1e-6 {
            if wheel.abs() > 1e-6 {
                self.place();
            }
            return;
        }

        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(
            -FRAC_PI_2 + 1e-2,
            FRAC_PI_2 - 1e-2,
        );
        self.yaw_velocity *= 1.0 - self.damping;
        self.pitch_velocity *= 1.0 - self.damping;
        self.place();
    }

    fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    fn place(&self) {
        self.object.look_at(self.position(), self.target, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;
    use crate::scene::Scene;
    use approx::assert_relative_eq;

    fn orbit_rig() -> (Scene, crate::camera::Camera, Orbit) {
        let mut scene = Scene::new();
        let camera = scene.perspective_camera(75.0, 0.1..100.0);
        let orbit = Orbit::builder(&camera)
            .position(Vec3::new(0.0, 0.0, 5.0))
            .target(Vec3::ZERO)
            .build();
        scene.add(&camera);
        (scene, camera, orbit)
    }

    fn camera_position(scene: &mut Scene, camera: &crate::camera::Camera) -> Vec3 {
        scene.sync();
        scene.resolve(camera).world_transform.position
    }

    #[test]
    fn drag_preserves_distance_to_target() {
        let (mut scene, camera, mut orbit) = orbit_rig();

        let mut input = Input::new(800.0, 600.0);
        input.mouse_input(MOUSE_LEFT, true);
        input.cursor_moved(400.0, 300.0);
        input.cursor_moved(480.0, 330.0);
        orbit.update(&input);

        let position = camera_position(&mut scene, &camera);
        assert_relative_eq!(position.length(), 5.0, epsilon = 1e-4);
        assert!(position.distance(Vec3::new(0.0, 0.0, 5.0)) > 1e-3);
    }

    #[test]
    fn drag_without_button_is_ignored() {
        let (mut scene, camera, mut orbit) = orbit_rig();

        let mut input = Input::new(800.0, 600.0);
        input.cursor_moved(400.0, 300.0);
        input.cursor_moved(480.0, 330.0);
        orbit.update(&input);

        let position = camera_position(&mut scene, &camera);
        assert_relative_eq!(position.distance(Vec3::new(0.0, 0.0, 5.0)), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn wheel_dollies_towards_target() {
        let (mut scene, camera, mut orbit) = orbit_rig();

        let mut input = Input::new(800.0, 600.0);
        input.mouse_wheel_moved(1.0);
        orbit.update(&input);

        let position = camera_position(&mut scene, &camera);
        assert_relative_eq!(position.length(), 4.5, epsilon = 1e-4);
    }

    #[test]
    fn rotation_decays_after_release() {
        let (mut scene, camera, mut orbit) = orbit_rig();

        let mut input = Input::new(800.0, 600.0);
        input.mouse_input(MOUSE_LEFT, true);
        input.cursor_moved(400.0, 300.0);
        input.cursor_moved(480.0, 300.0);
        orbit.update(&input);
        let after_drag = camera_position(&mut scene, &camera);

        input.mouse_input(MOUSE_LEFT, false);
        input.reset_deltas();
        orbit.update(&input);
        let coast = camera_position(&mut scene, &camera).distance(after_drag);
        assert!(coast > 0.0);

        for _ in 0..200 {
            orbit.update(&input);
        }
        let settled = camera_position(&mut scene, &camera);
        orbit.update(&input);
        let residual = camera_position(&mut scene, &camera).distance(settled);
        assert!(residual < 1e-4);
    }
}
