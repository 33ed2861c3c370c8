//! Camera controls.

mod orbit;

pub use self::orbit::{Builder as OrbitBuilder, Orbit};
