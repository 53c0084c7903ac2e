use crate::types::ParticleId;

/// A proximity link between two particles of the current frame.
///
/// `a < b` always holds, so each unordered pair has exactly one
/// representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: ParticleId,
    pub b: ParticleId,
    /// `1 - distance / link_distance`, in `(0, 1]`.
    pub weight: f64,
}

/// A per-frame scratch buffer holding the proximity edges of one frame.
///
/// The buffer is rebuilt from scratch every frame by
/// [`crate::phases::link_phase`]; keeping it around between frames only
/// saves the allocation. Nothing in it survives a rebuild, and indices
/// refer to the [`crate::particle::ParticleStore`] generation it was built
/// from.
#[derive(Debug, Default)]
pub struct EdgeBuffer {
    edges: Vec<Edge>,
}

impl EdgeBuffer {
    /// Creates an empty [`EdgeBuffer`] with room for `capacity` edges.
    ///
    /// ### Parameters
    /// - `capacity` - Number of edges to reserve space for.
    ///
    /// ### Returns
    /// An empty buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
        }
    }

    /// Upper bound on the number of edges among `n` particles, `n(n-1)/2`.
    pub fn max_edges(n: usize) -> usize {
        n * n.saturating_sub(1) / 2
    }

    /// Drops every edge but keeps the allocation.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Appends one edge.
    ///
    /// ### Parameters
    /// - `a` - Lower particle index of the pair.
    /// - `b` - Higher particle index of the pair.
    /// - `weight` - Closeness weight of the pair.
    ///
    /// ### Panics
    /// Panics in debug builds if `a >= b`.
    #[inline]
    pub fn push(&mut self, a: ParticleId, b: ParticleId, weight: f64) {
        debug_assert!(a < b, "edge endpoints must be ordered: {a} >= {b}");
        self.edges.push(Edge { a, b, weight });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up the edge joining two particles, in either order.
    ///
    /// ### Parameters
    /// - `a`, `b` - The two particle ids.
    ///
    /// ### Returns
    /// The edge if the pair was linked this frame, `None` otherwise.
    pub fn find(&self, a: ParticleId, b: ParticleId) -> Option<&Edge> {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        self.edges.iter().find(|e| e.a == lo && e.b == hi)
    }
}
