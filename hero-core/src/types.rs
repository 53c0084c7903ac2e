use glam::DVec2;

/// Identifier for a particle in a [`crate::particle::ParticleStore`].
///
/// This is an index into `ParticleStore::particles`, and is only meaningful
/// within one seeding generation of the store.
pub type ParticleId = usize;

/// Logical extent of the drawing area, in surface units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Negative or non-finite extents collapse to zero.
    pub fn new(width: f64, height: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Returns `true` if `p` lies in `[0, width) × [0, height)`.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }

    pub fn max_corner(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}
