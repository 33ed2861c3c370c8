//! An animated 3D analog clock, rendered with a small three.js style scene
//! graph on top of wgpu.
//!
//! The crate splits into three layers:
//!
//! * [`angles`] turns a timestamp into the three hand rotations. Pure math,
//!   no rendering.
//! * The scene graph ([`Scene`], [`Group`], [`Mesh`], [`camera`]) holds
//!   objects and their transforms. Handles are cheap clones that talk to the
//!   scene through messages, applied once per frame.
//! * [`window::Window`] owns the event loop and the GPU renderer and drives
//!   a per-frame callback.
//!
//! [`clock::Clock`] assembles the watch model out of scene primitives and
//! points its hands at a given time.

pub mod angles;
pub mod assets;
pub mod camera;
pub mod clock;
pub mod color;
pub mod controls;
pub mod dial;
mod error;
pub mod geometry;
mod graph;
pub mod group;
mod input;
pub mod material;
pub mod mesh;
pub mod node;
pub mod object;
mod render;
pub mod scene;
pub mod texture;
pub mod window;

pub use self::angles::{ClockTime, HandAngles};
pub use self::camera::Camera;
pub use self::clock::Clock;
pub use self::color::Color;
pub use self::error::{Error, Result};
pub use self::geometry::Geometry;
pub use self::group::Group;
pub use self::input::{Button, Input, MOUSE_LEFT};
pub use self::material::Material;
pub use self::mesh::Mesh;
pub use self::node::{Node, Transform};
pub use self::object::{Base, Object};
pub use self::scene::{AmbientLight, Background, DirectionalLight, Scene};
pub use self::texture::{FilterMethod, Sampler, Texture, WrapMode};
pub use self::window::Window;
