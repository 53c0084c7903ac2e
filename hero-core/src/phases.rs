//! Per-frame simulation phases for the particle field.
//!
//! One animation frame runs:
//! 1. [`step_phase`] — every particle moves by its velocity and bounces off
//!    the soft boundary.
//! 2. [`link_phase`] — all particle pairs closer than the link distance are
//!    collected into an [`EdgeBuffer`] with a closeness weight.
//!
//! The result is then handed to [`crate::render::render`].

use crate::{edge_buffer::EdgeBuffer, particle::ParticleStore, types::Bounds};

/// Advances every particle by one frame.
///
/// For each particle, `pos += vel`. Afterwards, if a coordinate lies more
/// than `margin` outside `[0, bounds]`, the matching velocity component is
/// negated. Positions are never clamped, so a particle can sit up to one
/// frame's travel beyond the margin before it heads back in.
///
/// ### Parameters
/// - `store` - Particles to move.
/// - `bounds` - Logical drawing area.
/// - `margin` - Slack allowed outside the drawing area.
pub fn step_phase(store: &mut ParticleStore, bounds: Bounds, margin: f64) {
    for p in store.particles.iter_mut() {
        p.pos += p.vel;

        if p.pos.x < -margin || p.pos.x > bounds.width + margin {
            p.vel.x = -p.vel.x;
        }
        if p.pos.y < -margin || p.pos.y > bounds.height + margin {
            p.vel.y = -p.vel.y;
        }
    }
}

/// Rebuilds `edges` with every pair closer than `link_distance`.
///
/// All unordered pairs `(i, j)` with `i < j` are examined exactly once, in
/// lexicographic order. A pair at distance `d < link_distance` gets an edge
/// with weight `1 - d / link_distance`. This is quadratic in the particle
/// count and dominates the frame cost.
///
/// ### Parameters
/// - `store` - Particles of the current frame.
/// - `link_distance` - Exclusive distance threshold.
/// - `edges` - Scratch buffer; cleared before filling.
pub fn link_phase(store: &ParticleStore, link_distance: f64, edges: &mut EdgeBuffer) {
    edges.clear();

    let particles = &store.particles;
    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            let d = a.pos.distance(b.pos);
            if d < link_distance {
                edges.push(i, j, 1.0 - d / link_distance);
            }
        }
    }
}

/// Convenience wrapper around [`link_phase`] with a fresh buffer.
pub fn build_edges(store: &ParticleStore, link_distance: f64) -> EdgeBuffer {
    let mut edges = EdgeBuffer::with_capacity(store.len());
    link_phase(store, link_distance, &mut edges);
    edges
}
