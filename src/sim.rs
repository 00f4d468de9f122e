use std::f64::consts::PI;

use nalgebra::Vector2;
use rayon::prelude::*;

use crate::agent::Agent;
use crate::config::Config;
use crate::error::Error;
use crate::geometry::Circle;
use crate::trail::{Particle, Trail};

/// Pure visual state for one frame: the live trail particles and, when
/// obstacle drawing is enabled, the obstacle field. A renderer consumes
/// this; the simulation itself never touches a display.
#[derive(Debug)]
pub struct FrameSnapshot<'a> {
    pub frame: u64,
    pub particles: &'a [Particle],
    pub obstacles: &'a [Circle],
}

/// Owns the obstacle field, the agents and the trail, and advances all of
/// them one tick per `frame_step` call.
pub struct Simulation {
    obstacles: Vec<Circle>,
    agents: Vec<Agent>,
    trail: Trail,
    width: f64,
    height: f64,
    dt: f64,
    max_life: u32,
    circles_visible: bool,
    border_reflect: bool,
    frame: u64,
}

impl Simulation {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let agents = spawn_agents(config)?;
        Ok(Simulation {
            obstacles: config.obstacles.clone(),
            agents,
            trail: Trail::new(),
            width: f64::from(config.width),
            height: f64::from(config.height),
            dt: config.dt,
            max_life: config.max_life,
            circles_visible: config.circles_visible,
            border_reflect: config.border_reflect,
            frame: 0,
        })
    }

    /// One tick: age the trail, spawn a particle per agent at its pre-step
    /// position, then move every agent (border flip first, then the
    /// obstacle step). Agents never read each other, so the move pass runs
    /// in parallel.
    pub fn frame_step(&mut self) -> FrameSnapshot<'_> {
        self.trail.age();

        for agent in &self.agents {
            self.trail.spawn(agent.color, agent.position, self.max_life);
        }

        let (width, height, dt) = (self.width, self.height, self.dt);
        let border_reflect = self.border_reflect;
        let obstacles = &self.obstacles;
        self.agents.par_iter_mut().for_each(|agent| {
            if border_reflect {
                agent.reflect_border(width, height);
            }
            agent.advance(dt, obstacles);
        });

        self.frame += 1;
        FrameSnapshot {
            frame: self.frame,
            particles: self.trail.particles(),
            obstacles: if self.circles_visible {
                &self.obstacles
            } else {
                &[]
            },
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn obstacles(&self) -> &[Circle] {
        &self.obstacles
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Agents all start at the origin with directions fanned evenly around the
/// unit circle, sin-first: angle i gets (sin a, cos a), so index 0 points
/// straight up.
fn spawn_agents(config: &Config) -> Result<Vec<Agent>, Error> {
    (0..config.agent_count)
        .map(|idx| {
            let angle = 2.0 * PI * idx as f64 / config.agent_count as f64;
            Agent::new(
                config.color.color_at(idx, config.max_life),
                Vector2::zeros(),
                Vector2::new(angle.sin(), angle.cos()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorSpec, Hsv, hsv_to_rgb};

    fn test_config() -> Config {
        Config {
            agent_count: 4,
            ..Config::default()
        }
    }

    #[test]
    fn agents_fan_out_around_the_unit_circle() {
        let sim = Simulation::new(&test_config()).unwrap();
        let dirs: Vec<_> = sim.agents().iter().map(|a| a.direction).collect();
        assert_eq!(dirs.len(), 4);
        // Index 0 points up, index 1 a quarter turn clockwise (sin-first).
        assert!((dirs[0] - Vector2::new(0.0, 1.0)).norm() < 1e-12);
        assert!((dirs[1] - Vector2::new(1.0, 0.0)).norm() < 1e-12);
        assert!((dirs[2] - Vector2::new(0.0, -1.0)).norm() < 1e-12);
        assert!((dirs[3] - Vector2::new(-1.0, 0.0)).norm() < 1e-12);
        for d in dirs {
            assert!((d.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn gradient_palette_is_walked_by_agent_index_over_max_life() {
        let config = Config {
            agent_count: 451,
            color: ColorSpec::Gradient(Hsv::new(0.0, 0.8, 0.9), Hsv::new(1.0, 0.8, 0.9)),
            ..Config::default()
        };
        let sim = Simulation::new(&config).unwrap();
        assert_eq!(sim.agents()[0].color, hsv_to_rgb(Hsv::new(0.0, 0.8, 0.9)));
        assert_eq!(sim.agents()[225].color, hsv_to_rgb(Hsv::new(0.5, 0.8, 0.9)));
        assert_eq!(sim.agents()[450].color, hsv_to_rgb(Hsv::new(1.0, 0.8, 0.9)));
    }

    #[test]
    fn frame_step_spawns_one_particle_per_agent() {
        let mut sim = Simulation::new(&test_config()).unwrap();
        let snapshot = sim.frame_step();
        assert_eq!(snapshot.frame, 1);
        assert_eq!(snapshot.particles.len(), 4);
        // All spawned at the agents' pre-step position, the origin.
        for p in snapshot.particles {
            assert_eq!(p.position, Vector2::zeros());
            assert_eq!(p.life, 450);
        }
    }

    #[test]
    fn trail_length_saturates_at_max_life_times_agents() {
        let config = Config {
            agent_count: 3,
            max_life: 5,
            ..Config::default()
        };
        let mut sim = Simulation::new(&config).unwrap();
        for _ in 0..20 {
            sim.frame_step();
        }
        let snapshot = sim.frame_step();
        assert_eq!(snapshot.particles.len(), 3 * 5);
    }

    #[test]
    fn obstacles_appear_in_the_snapshot_only_when_visible() {
        let mut hidden = Simulation::new(&test_config()).unwrap();
        assert!(hidden.frame_step().obstacles.is_empty());

        let config = Config {
            circles_visible: true,
            ..test_config()
        };
        let mut shown = Simulation::new(&config).unwrap();
        assert_eq!(shown.frame_step().obstacles.len(), 22);
    }

    #[test]
    fn head_on_agent_bounces_off_the_north_circle() {
        // Agent 0 of the stock scene travels straight up at unit speed and
        // meets the circle at (0, 400) r=80 near tick 320, then mirrors
        // straight back down.
        let config = Config {
            agent_count: 1,
            border_reflect: false,
            ..Config::default()
        };
        let mut sim = Simulation::new(&config).unwrap();

        for _ in 0..319 {
            sim.frame_step();
        }
        let up = sim.agents()[0].clone();
        assert!((up.direction - Vector2::new(0.0, 1.0)).norm() < 1e-9);
        assert!(up.position.y <= 320.0);

        sim.frame_step();
        let bounced = &sim.agents()[0];
        assert!((bounced.position.y - 320.0).abs() < 1e-9);
        assert!((bounced.direction - Vector2::new(0.0, -1.0)).norm() < 1e-9);
    }
}
