//! Colour ramps for density fields.

use image::Rgb;

/// Maps an 8-bit intensity through the jet ramp (blue, cyan, yellow, red).
pub fn jet(value: u8) -> Rgb<u8> {
    let v = value as f64 / 255.0;
    let channel = |offset: f64| {
        let c = (1.5 - (4.0 * v - offset).abs()).clamp(0.0, 1.0);
        (c * 255.0).round() as u8
    };
    Rgb([channel(3.0), channel(2.0), channel(1.0)])
}
