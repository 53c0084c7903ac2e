use glam::DVec2;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use hero_core::config::Config;
use hero_core::edge_buffer::EdgeBuffer;
use hero_core::lifecycle::{
    Container, HeroField, LifecycleState, ManualScheduler, StaticEnvironment,
};
use hero_core::particle::{Particle, ParticleStore};
use hero_core::phases::{build_edges, step_phase};
use hero_core::render::{DrawCmd, DrawList, render};
use hero_core::types::Bounds;

/// Container with a recording surface whose size tests can change.
pub struct Panel {
    pub size: Bounds,
    pub list: DrawList,
}

impl Container for Panel {
    type Surface = DrawList;

    fn client_size(&self) -> Bounds {
        self.size
    }

    fn surface(&mut self) -> Option<&mut DrawList> {
        Some(&mut self.list)
    }
}

pub fn panel(width: f64, height: f64) -> Panel {
    Panel {
        size: Bounds::new(width, height),
        list: DrawList::default(),
    }
}

pub fn env(reduced_motion: bool) -> StaticEnvironment {
    StaticEnvironment {
        reduced_motion,
        device_pixel_ratio: 1.0,
    }
}

pub fn start(panel: Panel, reduced_motion: bool) -> HeroField<Panel, ManualScheduler, SmallRng> {
    HeroField::initialize(
        panel,
        ManualScheduler::new(),
        &env(reduced_motion),
        Config::default(),
        SmallRng::seed_from_u64(2024),
    )
}

// ==================================================================================
// Seeding
// ==================================================================================

#[test]
fn seeded_positions_stay_inside_bounds_for_many_counts() {
    let cfg = Config::default();
    let mut rng = SmallRng::seed_from_u64(9);
    let mut store = ParticleStore::new();

    for count in [0usize, 1, 2, 30, 80, 500] {
        let bounds = Bounds::new(rng.random_range(1.0..2000.0), rng.random_range(1.0..2000.0));
        store.seed(count, bounds, &cfg, &mut rng);
        assert_eq!(store.len(), count);
        assert!(store.iter().all(|p| bounds.contains(p.pos)));
    }
}

// ==================================================================================
// Stepping
// ==================================================================================

#[test]
fn velocity_flips_sign_after_crossing_the_margin() {
    let cfg = Config::default();
    let bounds = Bounds::new(200.0, 120.0);
    let mut rng = SmallRng::seed_from_u64(77);
    let mut store = ParticleStore::new();
    store.seed(60, bounds, &cfg, &mut rng);

    let mut flips = 0;
    for _ in 0..3000 {
        let before: Vec<Particle> = store.particles.clone();
        step_phase(&mut store, bounds, cfg.boundary_margin);

        for (old, new) in before.iter().zip(&store.particles) {
            let outside_x = new.pos.x < -10.0 || new.pos.x > bounds.width + 10.0;
            let outside_y = new.pos.y < -10.0 || new.pos.y > bounds.height + 10.0;
            if outside_x {
                assert_eq!(new.vel.x, -old.vel.x);
                flips += 1;
            } else {
                assert_eq!(new.vel.x, old.vel.x);
            }
            if outside_y {
                assert_eq!(new.vel.y, -old.vel.y);
                flips += 1;
            } else {
                assert_eq!(new.vel.y, old.vel.y);
            }
        }
    }

    assert!(flips > 0, "a long run should hit the boundary");
    let slack = cfg.boundary_margin + cfg.max_speed;
    assert!(store.iter().all(|p| {
        p.pos.x >= -slack
            && p.pos.x <= bounds.width + slack
            && p.pos.y >= -slack
            && p.pos.y <= bounds.height + slack
    }));
}

// ==================================================================================
// Proximity graph
// ==================================================================================

#[test]
fn edges_match_brute_force_distances() {
    let cfg = Config::default();
    let mut rng = SmallRng::seed_from_u64(123);
    let mut store = ParticleStore::new();
    store.seed(120, Bounds::new(500.0, 400.0), &cfg, &mut rng);

    let edges = build_edges(&store, 110.0);

    assert!(edges.len() <= EdgeBuffer::max_edges(store.len()));
    let n = store.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let d = store.particles[i].pos.distance(store.particles[j].pos);
            match edges.find(i, j) {
                Some(e) => {
                    assert!(d < 110.0);
                    assert!((e.weight - (1.0 - d / 110.0)).abs() < 1e-9);
                }
                None => assert!(d >= 110.0),
            }
        }
    }
    assert!(edges.iter().all(|e| e.a < e.b));
}

#[test]
fn three_particle_scenario_links_two_pairs() {
    let store = ParticleStore::from_positions(
        vec![
            DVec2::new(10.0, 10.0),
            DVec2::new(20.0, 20.0),
            DVec2::new(90.0, 90.0),
        ],
        1.5,
    );

    let edges = build_edges(&store, 110.0);

    assert_eq!(edges.len(), 2);
    let near = edges.find(0, 1).expect("0-1 linked");
    let far = edges.find(1, 2).expect("1-2 linked");
    assert!((near.weight - 0.8714).abs() < 1e-4);
    assert!((far.weight - 0.1001).abs() < 1e-4);
    assert!(edges.find(0, 2).is_none());
}

// ==================================================================================
// Rendering
// ==================================================================================

#[test]
fn render_is_idempotent_for_identical_input() {
    let cfg = Config::default();
    let mut rng = SmallRng::seed_from_u64(5);
    let mut store = ParticleStore::new();
    let area = Bounds::new(300.0, 200.0);
    store.seed(40, area, &cfg, &mut rng);
    let edges = build_edges(&store, cfg.link_distance);

    let mut a = DrawList::default();
    let mut b = DrawList::default();
    render(&mut a, area, &store, &edges, &cfg);
    render(&mut b, area, &store, &edges, &cfg);
    render(&mut b, area, &store, &edges, &cfg);

    assert_eq!(a.commands(), b.commands());
}

// ==================================================================================
// Lifecycle
// ==================================================================================

#[test]
fn reduced_motion_renders_once_and_never_ticks() {
    let mut field = start(panel(640.0, 360.0), true);

    for _ in 0..10 {
        field.pump();
    }

    assert_eq!(field.state(), LifecycleState::Paused);
    assert_eq!(field.frames_rendered(), 1);
    assert_eq!(field.scheduler().requested(), 0);
    assert_eq!(field.particles().len(), 30);
    let circles = field
        .container()
        .list
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCmd::Circle { .. }))
        .count();
    assert_eq!(circles, 30);
}

#[test]
fn resize_while_running_reseeds_exactly_once() {
    let mut field = start(panel(640.0, 360.0), false);
    for _ in 0..5 {
        assert!(field.pump());
    }
    let old: Vec<DVec2> = field.particles().iter().map(|p| p.pos).collect();

    field.container_mut().size = Bounds::new(90.0, 70.0);
    field.on_resize(&env(false));

    assert_eq!(field.generation(), 2);
    assert_eq!(field.state(), LifecycleState::Running);
    assert_eq!(field.particles().len(), 80);
    let bounds = Bounds::new(90.0, 70.0);
    assert!(field.particles().iter().all(|p| bounds.contains(p.pos)));
    assert!(field.particles().iter().all(|p| !old.contains(&p.pos)));

    // The loop continues with the new generation.
    assert!(field.pump());
    assert_eq!(field.generation(), 2);
    assert_eq!(field.scheduler().pending().len(), 1);
}

#[test]
fn hidden_field_does_no_work_until_visible_again() {
    let mut field = start(panel(320.0, 240.0), false);
    assert!(field.pump());

    field.set_visible(false, &env(false));
    assert!(!field.pump());
    assert_eq!(field.frames_rendered(), 1);

    field.set_visible(true, &env(false));
    assert!(field.pump());
    assert_eq!(field.frames_rendered(), 2);
}

#[test]
fn teardown_stops_the_loop() {
    let mut field = start(panel(320.0, 240.0), false);
    field.pump();

    field.teardown();

    assert_eq!(field.state(), LifecycleState::Destroyed);
    assert!(!field.pump());
    assert_eq!(field.scheduler().cancelled(), 1);
}
