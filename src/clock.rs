//! The analog clock model: case, dial, and the three hands.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec3};
use log::warn;
use time::{OffsetDateTime, UtcOffset};

use crate::angles::HandAngles;
use crate::color;
use crate::dial;
use crate::error::Result;
use crate::geometry::Geometry;
use crate::group::Group;
use crate::material::Phong;
use crate::mesh::Mesh;
use crate::object::Object;
use crate::scene::Scene;
use crate::texture::Texture;

const RADIUS: f32 = 2.0;
const THICKNESS: f32 = 0.3;
const CASE_SEGMENTS: u32 = 64;
const CASE_COLOR: color::Color = 0x9C7B4A;
const HAND_COLOR: color::Color = 0x333333;
const DIAL_RESOLUTION: u32 = 256;
/// How far each hand extends past the pivot on its short end.
const HAND_TAIL: f32 = 0.1;

/// A watch assembled from scene primitives, with hands driven by
/// [`update`](Clock::update).
///
/// The whole assembly hangs off one group, so the clock can be moved or
/// rotated as a unit.
pub struct Clock {
    group: Group,
    hour_pivot: Group,
    minute_pivot: Group,
    second_pivot: Group,
    back: Mesh,
    utc_offset: UtcOffset,
}

impl Clock {
    /// Builds the clock and adds it to the scene root.
    ///
    /// The local UTC offset is captured here, once; querying it later can
    /// fail once other threads are running.
    pub fn new(scene: &mut Scene) -> Result<Self> {
        let utc_offset = match UtcOffset::current_local_offset() {
            Ok(offset) => offset,
            Err(err) => {
                warn!("local UTC offset unavailable ({}), clock shows UTC", err);
                UtcOffset::UTC
            }
        };

        let group = scene.group();
        scene.add(&group);

        // Case: an open cylinder wall turned to face the viewer, capped
        // front and back.
        let wall = scene.mesh(
            Geometry::cylinder_wall(RADIUS, THICKNESS, CASE_SEGMENTS),
            side_material(),
        );
        wall.set_orientation(Quat::from_rotation_x(FRAC_PI_2));
        group.add(&wall);

        let front = scene.mesh(
            Geometry::disc(RADIUS, CASE_SEGMENTS),
            side_material(),
        );
        front.set_position(Vec3::new(0.0, 0.0, THICKNESS / 2.0));
        group.add(&front);

        let back = scene.mesh(
            Geometry::disc(RADIUS, CASE_SEGMENTS),
            side_material(),
        );
        back.set_transform(
            Vec3::new(0.0, 0.0, -THICKNESS / 2.0),
            Quat::from_rotation_y(PI),
            1.0,
        );
        group.add(&back);

        // The painted dial sits just proud of the front cap.
        let face = scene.mesh(
            Geometry::disc(RADIUS * 0.98, CASE_SEGMENTS),
            Phong {
                color: color::WHITE,
                map: Some(dial::paint(DIAL_RESOLUTION)?),
                glossiness: 50.0,
            },
        );
        face.set_position(Vec3::new(0.0, 0.0, THICKNESS / 2.0 + 0.01));
        group.add(&face);

        let second_pivot = hand(scene, &group, 0.02, 1.7, 0.01, color::RED, 0.01);
        let minute_pivot = hand(scene, &group, 0.05, 1.5, 0.02, HAND_COLOR, 0.02);
        let hour_pivot = hand(scene, &group, 0.07, 1.0, 0.03, HAND_COLOR, 0.03);

        Ok(Clock {
            group,
            hour_pivot,
            minute_pivot,
            second_pivot,
            back,
            utc_offset,
        })
    }

    /// Points the hands at the given moment.
    pub fn update(&self, time: OffsetDateTime) {
        let angles = HandAngles::at(time);
        self.hour_pivot
            .set_orientation(Quat::from_rotation_z(angles.hour as f32));
        self.minute_pivot
            .set_orientation(Quat::from_rotation_z(angles.minute as f32));
        self.second_pivot
            .set_orientation(Quat::from_rotation_z(angles.second as f32));
    }

    /// Points the hands at the current wall-clock time.
    pub fn tick(&self) {
        self.update(OffsetDateTime::now_utc().to_offset(self.utc_offset));
    }

    /// Replaces the case back with a textured finish.
    pub fn set_back_texture(&self, texture: Texture) {
        self.back.set_material(Phong {
            color: color::WHITE,
            map: Some(texture),
            glossiness: 30.0,
        });
    }

    /// Restores the plain case material on the back.
    pub fn apply_back_fallback(&self) {
        self.back.set_material(side_material());
    }

    /// The root group of the assembly.
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Pivot group of the hour hand.
    pub fn hour_pivot(&self) -> &Group {
        &self.hour_pivot
    }

    /// Pivot group of the minute hand.
    pub fn minute_pivot(&self) -> &Group {
        &self.minute_pivot
    }

    /// Pivot group of the second hand.
    pub fn second_pivot(&self) -> &Group {
        &self.second_pivot
    }
}

fn side_material() -> Phong {
    Phong {
        color: CASE_COLOR,
        ..Default::default()
    }
}

/// Spawns one hand: a pivot group at the dial center and a thin box hanging
/// off it so the pivot rotation sweeps the hand around the face.
fn hand(
    scene: &mut Scene,
    parent: &Group,
    width: f32,
    length: f32,
    depth: f32,
    color: color::Color,
    lift: f32,
) -> Group {
    let pivot = scene.group();
    pivot.set_position(Vec3::new(0.0, 0.0, THICKNESS / 2.0 + 0.01 + lift));
    parent.add(&pivot);

    let blade = scene.mesh(
        Geometry::cuboid(width, length, depth),
        Phong {
            color,
            ..Default::default()
        },
    );
    blade.set_position(Vec3::new(0.0, length / 2.0 - HAND_TAIL, 0.0));
    pivot.add(&blade);

    pivot
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2 as QUARTER;
    use time::macros::datetime;

    #[test]
    fn hands_point_up_at_midnight() {
        let mut scene = Scene::new();
        let clock = Clock::new(&mut scene).unwrap();
        clock.update(datetime!(2024-01-01 00:00:00 UTC));
        scene.sync();

        for pivot in [
            clock.hour_pivot(),
            clock.minute_pivot(),
            clock.second_pivot(),
        ] {
            let node = scene.resolve(pivot);
            let tip = node.world_transform.orientation * Vec3::Y;
            assert_relative_eq!(tip.y, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn quarter_past_three_points_right_and_down() {
        let mut scene = Scene::new();
        let clock = Clock::new(&mut scene).unwrap();
        clock.update(datetime!(2024-01-01 03:15:00 UTC));
        scene.sync();

        // Minute hand at a quarter past: swept -pi/2, pointing along +X.
        let minute = scene.resolve(clock.minute_pivot());
        let tip = minute.world_transform.orientation * Vec3::Y;
        assert_relative_eq!(tip.x, 1.0, epsilon = 1e-5);

        // Hour hand a quarter of the way from 3 towards 4.
        let hour = scene.resolve(clock.hour_pivot());
        let expected = Quat::from_rotation_z(-(3.25 / 12.0) * std::f32::consts::TAU);
        let actual = hour.world_transform.orientation;
        assert!(actual.dot(expected).abs() > 1.0 - 1e-5);

        // Second hand back at the top.
        let second = scene.resolve(clock.second_pivot());
        let tip = second.world_transform.orientation * Vec3::Y;
        assert_relative_eq!(tip.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn hour_hand_stacks_topmost() {
        let mut scene = Scene::new();
        let clock = Clock::new(&mut scene).unwrap();
        scene.sync();

        let z = |pivot: &Group| scene.resolve(pivot).world_transform.position.z;
        let hour = z(clock.hour_pivot());
        let minute = z(clock.minute_pivot());
        let second = z(clock.second_pivot());

        assert!(hour > minute);
        assert!(minute > second);
        // Even the lowest hand floats in front of the dial face.
        assert!(second > THICKNESS / 2.0 + 0.01);
    }

    #[test]
    fn back_texture_arrival_and_fallback() {
        let mut scene = Scene::new();
        let clock = Clock::new(&mut scene).unwrap();
        let texture = Texture::new(vec![0xFF; 4], 1, 1).unwrap();

        clock.set_back_texture(texture.clone());
        scene.sync();
        let textured = scene
            .draw_list()
            .iter()
            .filter(|item| item.material.map() == Some(&texture))
            .count();
        assert_eq!(textured, 1);

        clock.apply_back_fallback();
        scene.sync();
        let items = scene.draw_list();
        assert!(items.iter().all(|item| item.material.map() != Some(&texture)));
        // Wall, front cap, and back cap all wear the plain case material
        // again.
        let plain_case = items
            .iter()
            .filter(|item| item.material.color() == CASE_COLOR && item.material.map().is_none())
            .count();
        assert_eq!(plain_case, 3);
    }

    #[test]
    fn assembly_rotates_as_one() {
        let mut scene = Scene::new();
        let clock = Clock::new(&mut scene).unwrap();
        clock.group().set_orientation(Quat::from_rotation_y(QUARTER));
        clock.update(datetime!(2024-01-01 00:00:00 UTC));
        scene.sync();

        let pivot = scene.resolve(clock.second_pivot());
        // The pivot sits in front of the dial; a quarter turn about Y moves
        // it onto the +X axis.
        assert!(pivot.world_transform.position.x > 0.0);
        assert_relative_eq!(pivot.world_transform.position.z, 0.0, epsilon = 1e-6);
    }
}
