//! Material parameters for mesh rendering.

use crate::color::{self, Color};
use crate::texture::Texture;

/// Basic material with a solid color, not affected by lighting.
///
/// Default: [`WHITE`](crate::color::WHITE), no texture.
#[derive(Clone, Debug, PartialEq)]
pub struct Basic {
    /// Solid color applied in the absence of `map`.
    pub color: Color,
    /// Texture applied using the mesh texture coordinates.
    pub map: Option<Texture>,
}

impl Default for Basic {
    fn default() -> Self {
        Self {
            color: color::WHITE,
            map: None,
        }
    }
}

/// Phong material with shiny specular highlights.
///
/// Default: [`WHITE`](crate::color::WHITE), no texture, glossiness of `30.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Phong {
    /// Solid color applied in the absence of `map`.
    pub color: Color,
    /// Texture applied using the mesh texture coordinates. Modulated by
    /// `color`.
    pub map: Option<Texture>,
    /// Specular exponent. Higher values give smaller, sharper highlights.
    pub glossiness: f32,
}

impl Default for Phong {
    fn default() -> Self {
        Self {
            color: color::WHITE,
            map: None,
            glossiness: 30.0,
        }
    }
}

/// Specifies the appearance of a [`Mesh`](crate::mesh::Mesh).
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// Renders the mesh with a solid color or texture, ignoring lighting.
    Basic(Basic),
    /// Renders the mesh with Blinn-Phong shading.
    Phong(Phong),
}

impl Material {
    /// The base color of the material.
    pub fn color(&self) -> Color {
        match *self {
            Material::Basic(ref params) => params.color,
            Material::Phong(ref params) => params.color,
        }
    }

    /// The texture of the material, if any.
    pub fn map(&self) -> Option<&Texture> {
        match *self {
            Material::Basic(ref params) => params.map.as_ref(),
            Material::Phong(ref params) => params.map.as_ref(),
        }
    }
}

impl From<Basic> for Material {
    fn from(params: Basic) -> Material {
        Material::Basic(params)
    }
}

impl From<Phong> for Material {
    fn from(params: Phong) -> Material {
        Material::Phong(params)
    }
}
