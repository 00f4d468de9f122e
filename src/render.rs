use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use nalgebra::Vector2;

use crate::geometry::Circle;
use crate::sim::FrameSnapshot;
use crate::trail::Particle;

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const OBSTACLE_FILL: Rgba<u8> = Rgba([204, 204, 204, 255]); // #cccccc

/// Half-extent of the square dot drawn per particle (stroke weight 3).
const DOT_REACH: i64 = 1;

/// Mapping between simulation coordinates (origin at the canvas middle,
/// y up) and screen coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    pub fn to_screen(&self, p: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            p.x + f64::from(self.width) / 2.0,
            f64::from(self.height) / 2.0 - p.y,
        )
    }

    pub fn to_sim(&self, p: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            p.x - f64::from(self.width) / 2.0,
            f64::from(self.height) / 2.0 - p.y,
        )
    }
}

/// Draws frame snapshots onto a fresh RGBA canvas: black background, trail
/// particles as 3x3 dots whose alpha channel is the remaining life, then
/// the obstacle field on top when the snapshot carries one.
pub struct Renderer {
    viewport: Viewport,
}

impl Renderer {
    pub fn new(viewport: Viewport) -> Self {
        Renderer { viewport }
    }

    pub fn render(&self, snapshot: &FrameSnapshot<'_>) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(self.viewport.width, self.viewport.height, BACKGROUND);
        for particle in snapshot.particles {
            self.draw_particle(&mut img, particle);
        }
        for circle in snapshot.obstacles {
            self.draw_obstacle(&mut img, circle);
        }
        img
    }

    fn draw_particle(&self, img: &mut RgbaImage, particle: &Particle) {
        let screen = self.viewport.to_screen(particle.position);
        let cx = screen.x.round() as i64;
        let cy = screen.y.round() as i64;
        // The life counter saturates into the 8-bit alpha channel; lives
        // above 255 render fully opaque.
        let alpha = particle.life.min(255) as u8;
        let image::Rgb([r, g, b]) = particle.color;
        let pixel = Rgba([r, g, b, alpha]);

        for dy in -DOT_REACH..=DOT_REACH {
            for dx in -DOT_REACH..=DOT_REACH {
                self.put_pixel(img, cx + dx, cy + dy, pixel);
            }
        }
    }

    fn draw_obstacle(&self, img: &mut RgbaImage, circle: &Circle) {
        let screen = self.viewport.to_screen(circle.center);
        let r = circle.radius;
        let r_sq = r * r;

        let min_y = (screen.y - r).floor() as i64;
        let max_y = (screen.y + r).ceil() as i64;
        let min_x = (screen.x - r).floor() as i64;
        let max_x = (screen.x + r).ceil() as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 - screen.x;
                let dy = y as f64 - screen.y;
                if dx * dx + dy * dy <= r_sq {
                    self.put_pixel(img, x, y, OBSTACLE_FILL);
                }
            }
        }
    }

    fn put_pixel(&self, img: &mut RgbaImage, x: i64, y: i64, pixel: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.viewport.width && (y as u32) < self.viewport.height
        {
            img.put_pixel(x as u32, y as u32, pixel);
        }
    }
}

/// Zero-padded frame file name under `dir`.
pub fn frame_path(dir: &Path, frame: u64) -> PathBuf {
    dir.join(format!("frames_{frame:0>8}.png"))
}
