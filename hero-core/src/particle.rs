use glam::DVec2;
use rand::Rng;

use crate::{config::Config, types::Bounds};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    /// Displacement applied once per frame.
    pub vel: DVec2,
    pub radius: f64,
}

/// The live particle set of one sizing generation.
///
/// Particles are only ever replaced wholesale, by [`ParticleStore::seed`];
/// nothing adds or removes individual entries.
#[derive(Debug, Default)]
pub struct ParticleStore {
    pub particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store of motionless particles at fixed positions.
    pub fn from_positions(positions: Vec<DVec2>, radius: f64) -> Self {
        let particles = positions
            .into_iter()
            .map(|pos| Particle {
                pos,
                vel: DVec2::ZERO,
                radius,
            })
            .collect();

        Self { particles }
    }

    /// Discards every particle and replaces them with `count` fresh ones.
    ///
    /// Positions are uniform over `[0, width) × [0, height)`, velocity
    /// components uniform over `[-max_speed, max_speed)` and radii uniform
    /// over `[min_radius, max_radius)`. Empty bounds are fine and pin the
    /// corresponding coordinate to zero.
    pub fn seed(&mut self, count: usize, bounds: Bounds, cfg: &Config, rng: &mut impl Rng) {
        self.particles.clear();
        self.particles.reserve(count);

        for _ in 0..count {
            self.particles.push(Particle {
                pos: DVec2::new(
                    uniform(rng, 0.0, bounds.width),
                    uniform(rng, 0.0, bounds.height),
                ),
                vel: DVec2::new(
                    uniform(rng, -cfg.max_speed, cfg.max_speed),
                    uniform(rng, -cfg.max_speed, cfg.max_speed),
                ),
                radius: uniform(rng, cfg.min_radius, cfg.max_radius),
            });
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

/// Samples `[min, max)`; a zero-width range yields `min` instead of panicking.
#[inline]
fn uniform(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    rng.random::<f64>() * (max - min) + min
}
