// Simple color structs for the canvas fill styles. Embers are described in
// hue/saturation/lightness space, the trail overlay in plain RGBA.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    // Fully saturated color, which is all the embers ever use
    pub fn saturated(h: f64, l: f64, a: f64) -> Hsla {
        Hsla { h, s: 100.0, l, a }
    }

    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn black(a: f64) -> Rgba {
        Rgba { r: 0, g: 0, b: 0, a }
    }

    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
