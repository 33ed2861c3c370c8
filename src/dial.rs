//! Software-painted clock dial texture.
//!
//! The watch face is generated at startup instead of shipped as an image
//! asset: a white square, a light face circle, a dark rim, minute and hour
//! ticks, and stroked numerals. The output is a regular [`Texture`] that the
//! clock assembly maps onto the front disc.

use std::f32::consts::TAU;

use crate::color::{self, Color};
use crate::error::Result;
use crate::texture::Texture;

const FACE_COLOR: Color = 0xF8F8F8;
const RIM_COLOR: Color = 0x333333;
const TICK_COLOR: Color = 0x555555;
const NUMERAL_COLOR: Color = 0x333333;

/// Paints a square dial of `size` pixels per side.
pub fn paint(size: u32) -> Result<Texture> {
    let mut canvas = Canvas::new(size);
    let c = size as f32 / 2.0;
    // Dial radius at 45% of the canvas leaves a white margin to the edge.
    let r = size as f32 * 0.45;

    canvas.fill(color::WHITE);
    canvas.fill_circle(c, c, r, FACE_COLOR);
    canvas.ring(c, c, r, size as f32 * 0.02, RIM_COLOR);

    // Sixty ticks around the rim, longer and thicker at the hour marks.
    for i in 0..60 {
        let angle = i as f32 / 60.0 * TAU;
        let (sin, cos) = angle.sin_cos();
        let major = i % 5 == 0;
        let outer = r * 0.9;
        let inner = outer - if major { r * 0.10 } else { r * 0.05 };
        let width = size as f32 * if major { 0.015 } else { 0.008 };
        canvas.line(
            c + sin * outer,
            c - cos * outer,
            c + sin * inner,
            c - cos * inner,
            width,
            TICK_COLOR,
        );
    }

    // Hour numerals 1 through 12, clockwise from the top.
    for hour in 1..=12 {
        let angle = hour as f32 / 12.0 * TAU;
        let (sin, cos) = angle.sin_cos();
        canvas.draw_number(
            hour,
            c + sin * r * 0.75,
            c - cos * r * 0.75,
            size as f32 * 0.10,
            NUMERAL_COLOR,
        );
    }

    canvas.into_texture()
}

/// Minimal RGBA8 raster target. Coordinates are in pixels with `y` growing
/// downwards; all drawing is opaque overwrite.
struct Canvas {
    pixels: Vec<u8>,
    size: u32,
}

impl Canvas {
    fn new(size: u32) -> Self {
        Canvas {
            pixels: vec![0; size as usize * size as usize * 4],
            size,
        }
    }

    fn into_texture(self) -> Result<Texture> {
        Texture::new(self.pixels, self.size, self.size)
    }

    fn put(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.size as i32 || y >= self.size as i32 {
            return;
        }
        let offset = (y as usize * self.size as usize + x as usize) * 4;
        self.pixels[offset..offset + 4].copy_from_slice(&rgba);
    }

    fn fill(&mut self, color: Color) {
        let rgba = color::to_rgba_bytes(color);
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Paints every pixel whose center satisfies `covered`, restricted to
    /// the given bounding box.
    fn rasterize(
        &mut self,
        bounds: (f32, f32, f32, f32),
        color: Color,
        covered: impl Fn(f32, f32) -> bool,
    ) {
        let rgba = color::to_rgba_bytes(color);
        let (min_x, min_y, max_x, max_y) = bounds;
        for y in min_y.floor() as i32..=max_y.ceil() as i32 {
            for x in min_x.floor() as i32..=max_x.ceil() as i32 {
                if covered(x as f32 + 0.5, y as f32 + 0.5) {
                    self.put(x, y, rgba);
                }
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.rasterize(
            (cx - radius, cy - radius, cx + radius, cy + radius),
            color,
            |x, y| {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= radius * radius
            },
        );
    }

    /// Strokes a circle outline of the given line width.
    fn ring(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Color) {
        let half = width / 2.0;
        self.rasterize(
            (
                cx - radius - half,
                cy - radius - half,
                cx + radius + half,
                cy + radius + half,
            ),
            color,
            |x, y| {
                let (dx, dy) = (x - cx, y - cy);
                ((dx * dx + dy * dy).sqrt() - radius).abs() <= half
            },
        );
    }

    /// Strokes a line segment as a capsule of the given width.
    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Color) {
        let half = width / 2.0;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len_sq = dx * dx + dy * dy;
        self.rasterize(
            (
                x0.min(x1) - half,
                y0.min(y1) - half,
                x0.max(x1) + half,
                y0.max(y1) + half,
            ),
            color,
            |x, y| {
                let t = if len_sq > 0.0 {
                    (((x - x0) * dx + (y - y0) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (px, py) = (x0 + t * dx, y0 + t * dy);
                let (ex, ey) = (x - px, y - py);
                ex * ex + ey * ey <= half * half
            },
        );
    }

    /// Strokes `number` centered at `(cx, cy)`, `height` pixels tall, using
    /// seven-segment style digits.
    fn draw_number(&mut self, number: u32, cx: f32, cy: f32, height: f32, color: Color) {
        let digits: Vec<u32> = if number == 0 {
            vec![0]
        } else {
            let mut rest = number;
            let mut out = Vec::new();
            while rest > 0 {
                out.push(rest % 10);
                rest /= 10;
            }
            out.reverse();
            out
        };

        let digit_width = height * 0.6;
        let spacing = height * 0.25;
        let stroke = height * 0.12;
        let total = digits.len() as f32 * digit_width + (digits.len() - 1) as f32 * spacing;
        let mut left = cx - total / 2.0;
        let top = cy - height / 2.0;

        for digit in digits {
            for &(sx0, sy0, sx1, sy1) in digit_segments(digit) {
                self.line(
                    left + sx0 * digit_width,
                    top + sy0 * height,
                    left + sx1 * digit_width,
                    top + sy1 * height,
                    stroke,
                    color,
                );
            }
            left += digit_width + spacing;
        }
    }
}

// Seven-segment layout in a unit box, y growing downwards:
//
//   0-A-1
//   F   B
//   2-G-3
//   E   C
//   4-D-5
const SEG_A: (f32, f32, f32, f32) = (0.0, 0.0, 1.0, 0.0);
const SEG_B: (f32, f32, f32, f32) = (1.0, 0.0, 1.0, 0.5);
const SEG_C: (f32, f32, f32, f32) = (1.0, 0.5, 1.0, 1.0);
const SEG_D: (f32, f32, f32, f32) = (0.0, 1.0, 1.0, 1.0);
const SEG_E: (f32, f32, f32, f32) = (0.0, 0.5, 0.0, 1.0);
const SEG_F: (f32, f32, f32, f32) = (0.0, 0.0, 0.0, 0.5);
const SEG_G: (f32, f32, f32, f32) = (0.0, 0.5, 1.0, 0.5);

fn digit_segments(digit: u32) -> &'static [(f32, f32, f32, f32)] {
    match digit {
        0 => &[SEG_A, SEG_B, SEG_C, SEG_D, SEG_E, SEG_F],
        1 => &[SEG_B, SEG_C],
        2 => &[SEG_A, SEG_B, SEG_G, SEG_E, SEG_D],
        3 => &[SEG_A, SEG_B, SEG_G, SEG_C, SEG_D],
        4 => &[SEG_F, SEG_G, SEG_B, SEG_C],
        5 => &[SEG_A, SEG_F, SEG_G, SEG_C, SEG_D],
        6 => &[SEG_A, SEG_F, SEG_G, SEG_E, SEG_C, SEG_D],
        7 => &[SEG_A, SEG_B, SEG_C],
        8 => &[SEG_A, SEG_B, SEG_C, SEG_D, SEG_E, SEG_F, SEG_G],
        _ => &[SEG_A, SEG_B, SEG_C, SEG_D, SEG_F, SEG_G],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(texture: &Texture, x: u32, y: u32) -> [u8; 4] {
        let offset = (y * texture.width() + x) as usize * 4;
        let p = &texture.pixels()[offset..offset + 4];
        [p[0], p[1], p[2], p[3]]
    }

    #[test]
    fn painting_is_deterministic() {
        let a = paint(64).unwrap();
        let b = paint(64).unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn face_rim_and_background() {
        let dial = paint(256).unwrap();
        assert_eq!(dial.width(), 256);
        assert_eq!(dial.height(), 256);

        // Corners lie outside the dial circle.
        assert_eq!(pixel(&dial, 0, 0), color::to_rgba_bytes(color::WHITE));
        assert_eq!(pixel(&dial, 255, 255), color::to_rgba_bytes(color::WHITE));

        // Face color at the center.
        assert_eq!(pixel(&dial, 128, 128), color::to_rgba_bytes(FACE_COLOR));

        // White margin between the rim and the texture edge.
        assert_eq!(pixel(&dial, 128, 3), color::to_rgba_bytes(color::WHITE));

        // Rim stroke straight up from the center, at 45% of the canvas.
        assert_eq!(pixel(&dial, 128, 13), color::to_rgba_bytes(RIM_COLOR));
    }

    #[test]
    fn major_tick_at_twelve_o_clock() {
        let dial = paint(256).unwrap();
        // The 12 o'clock tick spans dial radii 0.8 to 0.9; with the dial
        // radius at 115.2 pixels that is rows 24.3 to 35.8.
        assert_eq!(pixel(&dial, 128, 30), color::to_rgba_bytes(TICK_COLOR));
    }

    #[test]
    fn numerals_leave_marks() {
        let dial = paint(256).unwrap();
        // The "3" sits centered at 0.75 of the dial radius to the right.
        let numeral = color::to_rgba_bytes(NUMERAL_COLOR);
        let found = (0..26).any(|dx| {
            (0..26).any(|dy| pixel(&dial, 128 + 86 - 13 + dx, 128 - 13 + dy) == numeral)
        });
        assert!(found);
    }
}
