//! Lifecycle of the particle field: sizing, frame scheduling and the
//! pause/resume state machine.
//!
//! [`HeroField`] is the only part of the crate that talks to the host. The
//! host supplies three things:
//!
//! - a [`Container`] that reports its logical size and hands out the
//!   drawing [`Surface`] (or `None` when it has none);
//! - a [`FrameScheduler`] that delivers one callback per display refresh;
//! - an [`Environment`] with the reduced-motion preference and device pixel
//!   ratio. It is only consulted at initialization, on resize and on resume.
//!
//! State transitions:
//!
//! ```text
//! Uninitialized ──initialize──▶ Running ◀──resume──▶ Paused
//!        │            (reduced motion) └──────────────▶ Paused
//!        └──────────── any ──teardown──▶ Destroyed
//! ```

use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::{
    config::Config,
    edge_buffer::EdgeBuffer,
    error::HeroError,
    phases,
    particle::ParticleStore,
    render::{self, Surface},
    types::Bounds,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Running,
    Paused,
    Destroyed,
}

/// Ambient host facts.
pub trait Environment {
    fn prefers_reduced_motion(&self) -> bool;
    fn device_pixel_ratio(&self) -> f64;
}

/// Fixed environment values, for headless hosts and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticEnvironment {
    pub reduced_motion: bool,
    pub device_pixel_ratio: f64,
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Environment for StaticEnvironment {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }
}

/// The host element the field draws into.
pub trait Container {
    type Surface: Surface;

    /// Current rendered size in logical units.
    fn client_size(&self) -> Bounds;

    /// The drawing surface, or `None` if the host cannot provide one.
    fn surface(&mut self) -> Option<&mut Self::Surface>;
}

/// Handle for one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTicket(pub u64);

/// Display-refresh aligned callbacks.
///
/// A request yields a ticket; the host later hands due tickets back through
/// [`FrameScheduler::take_due`]. Cancelling a ticket guarantees it is never
/// returned as due.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameTicket;
    fn cancel_frame(&mut self, ticket: FrameTicket);
    /// Pops the next callback that is ready to run, if any.
    fn take_due(&mut self) -> Option<FrameTicket>;
}

/// A scheduler the host drives by hand: every requested frame is due
/// immediately, in request order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: Vec<FrameTicket>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[FrameTicket] {
        &self.pending
    }

    /// Total number of frames ever requested.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total number of requests withdrawn before they ran.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameTicket {
        self.next += 1;
        self.requested += 1;
        let ticket = FrameTicket(self.next);
        self.pending.push(ticket);
        ticket
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        let before = self.pending.len();
        self.pending.retain(|t| *t != ticket);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }

    fn take_due(&mut self) -> Option<FrameTicket> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

/// Size and scale the surface was last configured with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceState {
    pub bounds: Bounds,
    pub pixel_scale: f64,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            pixel_scale: 1.0,
        }
    }
}

/// The animated particle field bound to one host container.
///
/// ### Fields
/// - `container` - Host element owning the drawing surface.
/// - `scheduler` - Frame callback source.
/// - `rng` - Random source for seeding particles.
/// - `cfg` - Field configuration.
///
/// - `state` - Current lifecycle state.
/// - `surface` - Logical size and pixel scale in effect.
/// - `reduced_motion` - Preference as last sampled from the environment.
///
/// - `store` - Particles of the current generation.
/// - `edges` - Edges of the last computed frame.
/// - `pending` - The one outstanding frame request, if any.
///
/// - `frames_rendered` - Frames painted so far, static frames included.
/// - `generation` - Number of reseeds so far.
pub struct HeroField<C: Container, S: FrameScheduler, R: Rng> {
    container: C,
    scheduler: S,
    rng: R,
    cfg: Config,

    state: LifecycleState,
    surface: SurfaceState,
    reduced_motion: bool,

    store: ParticleStore,
    edges: EdgeBuffer,
    pending: Option<FrameTicket>,

    frames_rendered: u64,
    generation: u64,
}

impl<C: Container, S: FrameScheduler, R: Rng> HeroField<C, S, R> {
    /// Binds to the container's surface and starts the field.
    ///
    /// If the configuration is invalid or the container has no surface,
    /// the field stays [`LifecycleState::Uninitialized`] and ignores every
    /// later event. Nothing is reported to the caller beyond a log line.
    ///
    /// Otherwise the surface is sized, particles are seeded, and:
    /// - with reduced motion, one static frame is drawn and the field rests
    ///   in [`LifecycleState::Paused`];
    /// - without it, the field is [`LifecycleState::Running`] with one
    ///   frame requested.
    pub fn initialize(
        container: C,
        scheduler: S,
        env: &impl Environment,
        cfg: Config,
        rng: R,
    ) -> Self {
        let mut field = Self {
            container,
            scheduler,
            rng,
            cfg,
            state: LifecycleState::Uninitialized,
            surface: SurfaceState::default(),
            reduced_motion: false,
            store: ParticleStore::new(),
            edges: EdgeBuffer::default(),
            pending: None,
            frames_rendered: 0,
            generation: 0,
        };

        if let Err(err) = field.start(env) {
            warn!(error = %err, "particle field disabled");
        }
        field
    }

    fn start(&mut self, env: &impl Environment) -> Result<(), HeroError> {
        self.cfg.validate()?;

        self.reduced_motion = env.prefers_reduced_motion();
        let bounds = self.container.client_size();
        let scale = self.cfg.clamp_pixel_scale(env.device_pixel_ratio());
        self.apply_sizing(bounds, scale)?;
        self.reseed();

        if self.reduced_motion {
            self.draw_static();
            self.transition(LifecycleState::Paused);
        } else {
            self.transition(LifecycleState::Running);
            self.schedule();
        }
        Ok(())
    }

    /// Runs one animation frame for `ticket`.
    ///
    /// Only the currently pending ticket of a running field is honoured;
    /// stale or cancelled tickets are ignored. A frame is step, link and
    /// render, followed by a request for the next frame.
    ///
    /// ### Returns
    /// `true` if a frame was rendered.
    pub fn on_frame(&mut self, ticket: FrameTicket) -> bool {
        if self.state != LifecycleState::Running || self.pending != Some(ticket) {
            trace!(?ticket, state = ?self.state, "ignoring stale frame");
            return false;
        }
        self.pending = None;

        phases::step_phase(
            &mut self.store,
            self.surface.bounds,
            self.cfg.boundary_margin,
        );
        phases::link_phase(&self.store, self.cfg.link_distance, &mut self.edges);
        self.paint();

        self.schedule();
        true
    }

    /// Runs the frame the scheduler reports as due, if there is one.
    pub fn pump(&mut self) -> bool {
        match self.scheduler.take_due() {
            Some(ticket) => self.on_frame(ticket),
            None => false,
        }
    }

    /// Stops the frame loop. Only affects a running field.
    pub fn pause(&mut self) {
        if self.state != LifecycleState::Running {
            return;
        }
        self.cancel_pending();
        self.transition(LifecycleState::Paused);
    }

    /// Restarts the frame loop of a paused field.
    ///
    /// The reduced-motion preference is sampled again; while it is active
    /// the field stays paused.
    pub fn resume(&mut self, env: &impl Environment) {
        if self.state != LifecycleState::Paused {
            return;
        }
        self.reduced_motion = env.prefers_reduced_motion();
        if self.reduced_motion {
            debug!("reduced motion requested, staying paused");
            return;
        }
        self.transition(LifecycleState::Running);
        self.schedule();
    }

    /// Host visibility changed.
    pub fn set_visible(&mut self, visible: bool, env: &impl Environment) {
        if visible {
            self.resume(env);
        } else {
            self.pause();
        }
    }

    /// Host container may have changed size or pixel density.
    ///
    /// When either differs from the current surface state, the backing
    /// store is resized and the particle set is reseeded from scratch at
    /// the new size. A paused field redraws a static frame right away; a
    /// running one shows the new generation on its next frame.
    pub fn on_resize(&mut self, env: &impl Environment) {
        if !matches!(
            self.state,
            LifecycleState::Running | LifecycleState::Paused
        ) {
            return;
        }

        let bounds = self.container.client_size();
        let scale = self.cfg.clamp_pixel_scale(env.device_pixel_ratio());
        if bounds == self.surface.bounds && scale == self.surface.pixel_scale {
            return;
        }

        if let Err(err) = self.apply_sizing(bounds, scale) {
            warn!(error = %err, "resize skipped");
            return;
        }
        self.reseed();

        if self.state == LifecycleState::Paused {
            self.draw_static();
        }
    }

    /// Shuts the field down for good. Pending frames are cancelled and all
    /// later events are ignored.
    pub fn teardown(&mut self) {
        if self.state == LifecycleState::Destroyed {
            return;
        }
        self.cancel_pending();
        self.transition(LifecycleState::Destroyed);
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn surface_state(&self) -> SurfaceState {
        self.surface
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn edges(&self) -> &EdgeBuffer {
        &self.edges
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_frame(&self) -> Option<FrameTicket> {
        self.pending
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn apply_sizing(&mut self, bounds: Bounds, scale: f64) -> Result<(), HeroError> {
        let surface = self
            .container
            .surface()
            .ok_or(HeroError::SurfaceUnavailable)?;

        let width_px = (bounds.width * scale).floor() as u32;
        let height_px = (bounds.height * scale).floor() as u32;
        surface.resize_backing(width_px, height_px);
        surface.set_transform(scale);

        self.surface = SurfaceState {
            bounds,
            pixel_scale: scale,
        };
        debug!(
            width = bounds.width,
            height = bounds.height,
            scale,
            width_px,
            height_px,
            "surface sized"
        );
        Ok(())
    }

    fn reseed(&mut self) {
        let count = self.cfg.particle_count_for(self.reduced_motion);
        self.store
            .seed(count, self.surface.bounds, &self.cfg, &mut self.rng);
        self.edges.clear();
        self.generation += 1;
        debug!(count, generation = self.generation, "particles reseeded");
    }

    /// Links and paints the current particles without moving them.
    fn draw_static(&mut self) {
        phases::link_phase(&self.store, self.cfg.link_distance, &mut self.edges);
        self.paint();
    }

    fn paint(&mut self) {
        let Some(surface) = self.container.surface() else {
            return;
        };
        render::render(
            surface,
            self.surface.bounds,
            &self.store,
            &self.edges,
            &self.cfg,
        );
        self.frames_rendered += 1;
    }

    fn schedule(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(ticket) = self.pending.take() {
            self.scheduler.cancel_frame(ticket);
        }
    }

    fn transition(&mut self, next: LifecycleState) {
        info!(from = ?self.state, to = ?next, "particle field state change");
        self.state = next;
    }
}
