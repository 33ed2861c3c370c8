//! sRGB colors packed as `0xRRGGBB` integers.

/// sRGB color represented by a 4-byte integer, `0xRRGGBB`.
pub type Color = u32;

pub const BLACK: Color = 0x000000;
pub const WHITE: Color = 0xFFFFFF;
pub const RED: Color = 0xFF0000;
pub const GREEN: Color = 0x00FF00;
pub const BLUE: Color = 0x0000FF;

/// Expands a packed color into linear RGB intensities for shading.
pub fn to_linear_rgb(c: Color) -> [f32; 3] {
    let f = |xu: u32| {
        let x = (xu & 0xFF) as f32 / 255.0;
        x.powf(2.2)
    };
    [f(c >> 16), f(c >> 8), f(c)]
}

/// Expands a packed color into its sRGB byte channels plus an opaque alpha.
pub fn to_rgba_bytes(c: Color) -> [u8; 4] {
    [(c >> 16) as u8, (c >> 8) as u8, c as u8, 0xFF]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_endpoints() {
        assert_eq!(to_linear_rgb(BLACK), [0.0, 0.0, 0.0]);
        let white = to_linear_rgb(WHITE);
        for channel in white {
            assert_relative_eq!(channel, 1.0, max_relative = 1e-6);
        }
    }

    #[test]
    fn linear_is_channel_independent() {
        let rgb = to_linear_rgb(0x102030);
        assert!(rgb[0] < rgb[1] && rgb[1] < rgb[2]);
        assert_eq!(to_linear_rgb(RED)[1], 0.0);
        assert_eq!(to_linear_rgb(RED)[2], 0.0);
    }

    #[test]
    fn rgba_bytes_unpack() {
        assert_eq!(to_rgba_bytes(0x9C7B4A), [0x9C, 0x7B, 0x4A, 0xFF]);
        assert_eq!(to_rgba_bytes(WHITE), [0xFF, 0xFF, 0xFF, 0xFF]);
    }
}
