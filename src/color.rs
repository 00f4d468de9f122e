use image::Rgb;
use serde::{Deserialize, Serialize};

/// HSV triple with every channel in [0, 1]; hue is a fraction of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Hsv { h, s, v }
    }
}

/// Convert to 8-bit RGB. Hue wraps modulo one turn, so h = 1 lands on the
/// same color as h = 0.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb<u8> {
    let Hsv { h, s, v } = hsv;
    if s <= 0.0 {
        let g = scale(v);
        return Rgb([g, g, g]);
    }

    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor() as u8 % 6;
    let f = h - h.floor();

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb([scale(r), scale(g), scale(b)])
}

fn scale(c: f64) -> u8 {
    (255.0 * c).round().clamp(0.0, 255.0) as u8
}

/// Palette configured at startup: one fixed color for every agent, or a
/// two-stop gradient walked by agent index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Solid(Hsv),
    Gradient(Hsv, Hsv),
}

impl ColorSpec {
    /// Color for agent `index`. The gradient interpolates componentwise in
    /// HSV proportionally to `index / max_life`; the particle lifetime is
    /// the denominator here, not the agent count.
    pub fn color_at(&self, index: usize, max_life: u32) -> Rgb<u8> {
        match *self {
            ColorSpec::Solid(hsv) => hsv_to_rgb(hsv),
            ColorSpec::Gradient(start, end) => {
                let ratio = index as f64 / f64::from(max_life);
                hsv_to_rgb(Hsv::new(
                    start.h + (end.h - start.h) * ratio,
                    start.s + (end.s - start.s) * ratio,
                    start.v + (end.v - start.v) * ratio,
                ))
            }
        }
    }
}
