use std::path::Path;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::color::{ColorSpec, Hsv};
use crate::error::Error;
use crate::geometry::Circle;

/// Offsets of the fixed obstacle field: 22 circles of radius 80, symmetric
/// about the origin.
const OBSTACLE_LAYOUT: [(f64, f64); 22] = [
    (0.0, 400.0),
    (0.0, -400.0),
    (400.0, 400.0),
    (-400.0, -400.0),
    (-400.0, 400.0),
    (400.0, -400.0),
    (-400.0, 0.0),
    (400.0, 0.0),
    (200.0, 200.0),
    (-200.0, -200.0),
    (-200.0, 200.0),
    (200.0, -200.0),
    (600.0, 200.0),
    (-600.0, -200.0),
    (-600.0, 200.0),
    (600.0, -200.0),
    (800.0, 400.0),
    (-800.0, -400.0),
    (-800.0, 400.0),
    (800.0, -400.0),
    (-800.0, 0.0),
    (800.0, 0.0),
];

const OBSTACLE_RADIUS: f64 = 80.0;

/// Startup configuration. The defaults reproduce the stock scene: a
/// 1600x900 canvas, 200 agents fanned out from the origin, a 450-tick trail
/// and the fixed 22-circle obstacle field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub dt: f64,
    pub agent_count: usize,
    pub max_life: u32,
    pub color: ColorSpec,
    pub circles_visible: bool,
    pub border_reflect: bool,
    pub obstacles: Vec<Circle>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 1600,
            height: 900,
            dt: 1.0,
            agent_count: 200,
            max_life: 450,
            color: ColorSpec::Solid(Hsv::new(130.0 / 360.0, 0.9, 0.9)),
            circles_visible: false,
            border_reflect: true,
            obstacles: default_obstacles(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if self.dt <= 0.0 {
            return Err(Error::InvalidTimeStep(self.dt));
        }
        if self.agent_count == 0 {
            return Err(Error::NoAgents);
        }
        if self.max_life == 0 {
            return Err(Error::ZeroLifetime);
        }
        for circle in &self.obstacles {
            if circle.radius <= 0.0 {
                return Err(Error::InvalidRadius(circle.radius));
            }
        }
        Ok(())
    }
}

pub fn default_obstacles() -> Vec<Circle> {
    OBSTACLE_LAYOUT
        .iter()
        .map(|&(x, y)| Circle {
            center: Vector2::new(x, y),
            radius: OBSTACLE_RADIUS,
        })
        .collect()
}
