use image::Rgb;
use nalgebra::Vector2;

/// One trail marker. A snapshot of the spawning agent's color and position;
/// after spawn it has no tie back to the agent. The remaining `life` doubles
/// as the alpha channel when the particle is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub color: Rgb<u8>,
    pub position: Vector2<f64>,
    pub life: u32,
}

/// The simulation loop's particle collection. Particles are aged with an
/// explicit decrement-then-prune pass so nothing is removed while the live
/// collection is being walked.
#[derive(Debug, Default)]
pub struct Trail {
    particles: Vec<Particle>,
}

impl Trail {
    pub fn new() -> Self {
        Trail::default()
    }

    pub fn spawn(&mut self, color: Rgb<u8>, position: Vector2<f64>, max_life: u32) {
        self.particles.push(Particle {
            color,
            position,
            life: max_life,
        });
    }

    /// Age every particle by one tick and drop the expired ones. Called once
    /// per frame, before new spawns, so a particle spawned with life L is
    /// observable for exactly L frames at lives L, L-1, ..., 1.
    pub fn age(&mut self) {
        for p in &mut self.particles {
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
