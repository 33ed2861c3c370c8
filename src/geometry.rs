//! Mesh geometry: vertex data plus generators for the few primitive shapes
//! this crate needs.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

/// A collection of vertices with position, normal, and texture coordinate
/// attributes, indexed into triangles.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals.
    pub normals: Vec<Vec3>,
    /// Texture coordinates, with `v` growing downwards.
    pub tex_coords: Vec<Vec2>,
    /// Triangle faces as vertex indices.
    pub faces: Vec<[u32; 3]>,
}

impl Geometry {
    /// An axis-aligned box centered at the origin.
    ///
    /// Each face carries its own four vertices so normals stay flat.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
        // (normal, two in-plane axes scaled to the half extents)
        let sides = [
            (Vec3::X, Vec3::new(0.0, 0.0, -z), Vec3::new(0.0, y, 0.0)),
            (Vec3::NEG_X, Vec3::new(0.0, 0.0, z), Vec3::new(0.0, y, 0.0)),
            (Vec3::Y, Vec3::new(x, 0.0, 0.0), Vec3::new(0.0, 0.0, -z)),
            (Vec3::NEG_Y, Vec3::new(x, 0.0, 0.0), Vec3::new(0.0, 0.0, z)),
            (Vec3::Z, Vec3::new(x, 0.0, 0.0), Vec3::new(0.0, y, 0.0)),
            (Vec3::NEG_Z, Vec3::new(-x, 0.0, 0.0), Vec3::new(0.0, y, 0.0)),
        ];

        let mut geometry = Geometry::default();
        for (normal, u_axis, v_axis) in sides {
            let center = normal * Vec3::new(x, y, z);
            let base = geometry.positions.len() as u32;
            for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                geometry.positions.push(center + u_axis * u + v_axis * v);
                geometry.normals.push(normal);
                geometry
                    .tex_coords
                    .push(Vec2::new(0.5 + u * 0.5, 0.5 - v * 0.5));
            }
            geometry.faces.push([base, base + 1, base + 2]);
            geometry.faces.push([base, base + 2, base + 3]);
        }
        geometry
    }

    /// A flat disc in the XY plane facing +Z, triangulated as a fan around
    /// the center vertex.
    ///
    /// Texture coordinates map the disc onto the unit square, so a square
    /// image painted around its center lands centered on the disc.
    pub fn disc(radius: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut geometry = Geometry::default();

        geometry.positions.push(Vec3::ZERO);
        geometry.normals.push(Vec3::Z);
        geometry.tex_coords.push(Vec2::new(0.5, 0.5));

        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            geometry
                .positions
                .push(Vec3::new(radius * cos, radius * sin, 0.0));
            geometry.normals.push(Vec3::Z);
            geometry
                .tex_coords
                .push(Vec2::new(0.5 + cos * 0.5, 0.5 - sin * 0.5));
        }

        for i in 1..=segments {
            geometry.faces.push([0, i, i + 1]);
        }
        geometry
    }

    /// An open-ended cylinder wall around the Y axis, centered at the
    /// origin. No caps; pair it with [`disc`](Geometry::disc) for those.
    pub fn cylinder_wall(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let half = height / 2.0;
        let mut geometry = Geometry::default();

        // A duplicated seam column keeps the texture wrap continuous.
        for i in 0..=segments {
            let u = i as f32 / segments as f32;
            let angle = u * TAU;
            let (sin, cos) = angle.sin_cos();
            let normal = Vec3::new(cos, 0.0, sin);
            for (y, v) in [(half, 0.0), (-half, 1.0)] {
                geometry
                    .positions
                    .push(Vec3::new(radius * cos, y, radius * sin));
                geometry.normals.push(normal);
                geometry.tex_coords.push(Vec2::new(u, v));
            }
        }

        for i in 0..segments {
            let base = i * 2;
            geometry.faces.push([base, base + 2, base + 1]);
            geometry.faces.push([base + 2, base + 3, base + 1]);
        }
        geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_consistent(geometry: &Geometry) {
        let n = geometry.positions.len();
        assert_eq!(geometry.normals.len(), n);
        assert_eq!(geometry.tex_coords.len(), n);
        for face in &geometry.faces {
            for &index in face {
                assert!((index as usize) < n);
            }
        }
    }

    #[test]
    fn cuboid_has_flat_faces() {
        let geometry = Geometry::cuboid(1.0, 2.0, 3.0);
        assert_consistent(&geometry);
        assert_eq!(geometry.positions.len(), 24);
        assert_eq!(geometry.faces.len(), 12);

        for (position, normal) in geometry.positions.iter().zip(&geometry.normals) {
            assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-6);
            // Every vertex sits on the face plane its normal points out of.
            let extent = Vec3::new(0.5, 1.0, 1.5);
            assert_relative_eq!(position.dot(*normal), extent.dot(normal.abs()), epsilon = 1e-6);
        }
    }

    #[test]
    fn cuboid_faces_wind_outward() {
        let geometry = Geometry::cuboid(2.0, 2.0, 2.0);
        for face in &geometry.faces {
            let [a, b, c] = face.map(|i| geometry.positions[i as usize]);
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn disc_fan_covers_full_turn() {
        let geometry = Geometry::disc(2.0, 16);
        assert_consistent(&geometry);
        assert_eq!(geometry.faces.len(), 16);

        // Rim vertices sit on the circle; center carries the middle of the
        // texture.
        for position in &geometry.positions[1..] {
            assert_relative_eq!(position.truncate().length(), 2.0, epsilon = 1e-5);
        }
        assert_eq!(geometry.tex_coords[0], Vec2::new(0.5, 0.5));

        // First rim vertex maps to the right edge of the texture.
        assert_relative_eq!(geometry.tex_coords[1].x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(geometry.tex_coords[1].y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn cylinder_wall_is_open_ended() {
        let geometry = Geometry::cylinder_wall(1.0, 0.5, 8);
        assert_consistent(&geometry);
        assert_eq!(geometry.faces.len(), 16);

        for (position, normal) in geometry.positions.iter().zip(&geometry.normals) {
            // Radial normals, no Y component.
            assert_relative_eq!(normal.y, 0.0);
            assert_relative_eq!(
                Vec3::new(position.x, 0.0, position.z).length(),
                1.0,
                epsilon = 1e-5
            );
            assert_relative_eq!(position.y.abs(), 0.25, epsilon = 1e-6);
        }
    }

    #[test]
    fn cylinder_wall_faces_wind_outward() {
        let geometry = Geometry::cylinder_wall(1.0, 0.5, 8);
        for face in &geometry.faces {
            let [a, b, c] = face.map(|i| geometry.positions[i as usize]);
            let face_normal = (b - a).cross(c - a);
            let outward = Vec3::new(a.x + b.x + c.x, 0.0, a.z + b.z + c.z);
            assert!(face_normal.dot(outward) > 0.0);
        }
    }
}
