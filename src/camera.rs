//! Cameras are used to view scenes from different points in space.

use std::ops;

use glam::Mat4;

use crate::object::{object_type, Base};

/// The Z values of the near and far clip planes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZRange {
    /// Clip planes at finite Z values.
    Finite { near: f32, far: f32 },

    /// Near clip plane at a finite Z, far plane at infinity.
    Infinite { near: f32 },
}

impl From<ops::Range<f32>> for ZRange {
    fn from(range: ops::Range<f32>) -> ZRange {
        ZRange::Finite {
            near: range.start,
            far: range.end,
        }
    }
}

impl From<ops::RangeFrom<f32>> for ZRange {
    fn from(range: ops::RangeFrom<f32>) -> ZRange {
        ZRange::Infinite { near: range.start }
    }
}

/// Projection parameters of a camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in degrees.
        fov_y: f32,
        /// The Z values of the near and far clip planes.
        range: ZRange,
    },
}

impl Projection {
    /// Constructs a perspective projection.
    pub fn perspective<R: Into<ZRange>>(fov_y: f32, range: R) -> Self {
        Projection::Perspective {
            fov_y,
            range: range.into(),
        }
    }

    /// Computes the projection matrix for the given viewport aspect ratio.
    ///
    /// Maps to the 0..1 depth range expected by the GPU backend.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        match *self {
            Projection::Perspective { fov_y, range } => {
                let fov_y = fov_y.to_radians();
                match range {
                    ZRange::Finite { near, far } => {
                        Mat4::perspective_rh(fov_y, aspect, near, far)
                    }
                    ZRange::Infinite { near } => {
                        Mat4::perspective_infinite_rh(fov_y, aspect, near)
                    }
                }
            }
        }
    }
}

/// A camera handle plus its projection.
///
/// Created by
/// [`Scene::perspective_camera`](crate::scene::Scene::perspective_camera).
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub(crate) object: Base,

    /// Projection parameters of this camera.
    pub projection: Projection,
}

object_type!(Camera::object);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    #[test]
    fn range_conversions() {
        assert_eq!(
            ZRange::from(0.1..100.0),
            ZRange::Finite {
                near: 0.1,
                far: 100.0,
            },
        );
        assert_eq!(ZRange::from(0.5..), ZRange::Infinite { near: 0.5 });
    }

    #[test]
    fn finite_projection_depth_range() {
        let projection = Projection::perspective(75.0, 1.0..10.0);
        let m = projection.matrix(1.0);

        let near = m * Vec4::new(0.0, 0.0, -1.0, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-5);

        let far = m * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn infinite_projection_depth_range() {
        let projection = Projection::perspective(60.0, 0.1..);
        let m = projection.matrix(16.0 / 9.0);

        let near = m * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-5);

        let distant = m * Vec4::new(0.0, 0.0, -1.0e6, 1.0);
        assert_relative_eq!(distant.z / distant.w, 1.0, epsilon = 1e-4);
    }
}
