//! Native host for the hero particle field, built with eframe/egui.
//!
//! This module defines [`Viewer`], which plays the part of the page: it
//! owns the [`HeroField`], feeds it the central panel as container, maps
//! window minimization to visibility, and replays the field's retained
//! frame onto the egui painter every update.

use eframe::App;
use glam::DVec2;
use hero_core::{
    config::Config,
    lifecycle::{HeroField, LifecycleState},
    render::{Color, DrawCmd, DrawList},
    types::Bounds,
};
use rand::{SeedableRng, rngs::SmallRng};
use tracing::info;

use crate::host::{HostSignals, PanelContainer, RepaintScheduler};

type Field = HeroField<PanelContainer, RepaintScheduler, SmallRng>;

/// Main application state for the viewer.
///
/// ### Fields
/// - `cfg` - Field configuration handed to every (re)initialization.
/// - `seed` - Optional seed for a reproducible particle layout.
/// - `reduced_motion` - Simulated reduced-motion preference of the host.
/// - `hidden` - Last observed window visibility (minimized = hidden).
/// - `field` - The particle field; `None` until the first frame, or after
///   "Reinitialize" was clicked.
pub struct Viewer {
    cfg: Config,
    seed: Option<u64>,
    reduced_motion: bool,
    hidden: bool,
    field: Option<Field>,
}

impl Viewer {
    pub fn new(cfg: Config, reduced_motion: bool, seed: Option<u64>) -> Self {
        Self {
            cfg,
            seed,
            reduced_motion,
            hidden: false,
            field: None,
        }
    }

    fn signals(&self, ctx: &egui::Context) -> HostSignals {
        HostSignals {
            reduced_motion: self.reduced_motion,
            pixels_per_point: ctx.pixels_per_point(),
        }
    }

    fn make_rng(seed: Option<u64>) -> SmallRng {
        match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }

    /// Builds all panels for one egui frame.
    pub fn ui(&mut self, ctx: &egui::Context) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }

    /// Builds the top panel (pause/resume, preference toggle, teardown).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        let signals = self.signals(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.field.as_mut() {
                    Some(field) if field.state() == LifecycleState::Running => {
                        if ui.button("⏸ Pause").clicked() {
                            field.pause();
                        }
                    }
                    Some(field) if field.state() == LifecycleState::Paused => {
                        if ui.button("▶ Resume").clicked() {
                            field.resume(&signals);
                        }
                    }
                    _ => {
                        ui.add_enabled(false, egui::Button::new("▶ Resume"));
                    }
                }

                ui.checkbox(&mut self.reduced_motion, "Reduced motion");

                ui.separator();
                let destroyed = self
                    .field
                    .as_ref()
                    .is_some_and(|f| f.state() == LifecycleState::Destroyed);
                if destroyed {
                    if ui.button("Reinitialize").clicked() {
                        info!("reinitializing particle field");
                        self.field = None;
                    }
                } else if ui.button("Teardown").clicked()
                    && let Some(field) = self.field.as_mut()
                {
                    field.teardown();
                }
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let Some(field) = self.field.as_ref() else {
                    ui.label("not initialized");
                    return;
                };
                ui.label(format!("scale = {:.2}", field.surface_state().pixel_scale));
                ui.label(format!("generation = {}", field.generation()));
                ui.label(format!("frames = {}", field.frames_rendered()));
                ui.separator();
                ui.label(format!("edges = {}", field.edges().len()));
                ui.label(format!("particles = {}", field.particles().len()));
                ui.separator();
                ui.label(format!("{:?}", field.state()));
            });
        });
    }

    /// Builds the central panel that hosts the field.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        let signals = self.signals(ctx);
        let hidden = ctx.input(|i| i.viewport().minimized.unwrap_or(false));

        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);
            let size = Bounds::new(f64::from(rect.width()), f64::from(rect.height()));

            let field = self.field.get_or_insert_with(|| {
                HeroField::initialize(
                    PanelContainer::new(size),
                    RepaintScheduler::new(ctx.clone()),
                    &signals,
                    self.cfg,
                    Self::make_rng(self.seed),
                )
            });

            if hidden != self.hidden {
                self.hidden = hidden;
                field.set_visible(!hidden, &signals);
            }

            field.container_mut().set_size(size);
            field.on_resize(&signals);
            field.pump();

            if let Some(list) = field.container().backing() {
                paint_draw_list(&painter, rect, list);
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback; all work happens in [`Viewer::ui`].
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

fn to_color32(c: Color) -> egui::Color32 {
    let a = (c.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, a)
}

fn lerp_color(start: Color, end: Color, t: f64) -> Color {
    let channel = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::rgba(
        channel(start.r, end.r),
        channel(start.g, end.g),
        channel(start.b, end.b),
        start.a + (end.a - start.a) * t,
    )
}

/// Approximates a two-stop linear gradient over `area` with a colored quad.
///
/// Each corner gets the gradient color at its projection onto the
/// `from -> to` axis; egui interpolates between the vertices.
fn gradient_mesh(
    area: Bounds,
    from: DVec2,
    to: DVec2,
    start: Color,
    end: Color,
    to_screen: impl Fn(DVec2) -> egui::Pos2,
) -> egui::Mesh {
    let axis = to - from;
    let len2 = axis.length_squared();
    let t_at = |p: DVec2| {
        if len2 > 0.0 {
            ((p - from).dot(axis) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        }
    };

    let corners = [
        DVec2::ZERO,
        DVec2::new(area.width, 0.0),
        area.max_corner(),
        DVec2::new(0.0, area.height),
    ];

    let mut mesh = egui::Mesh::default();
    for c in corners {
        mesh.colored_vertex(to_screen(c), to_color32(lerp_color(start, end, t_at(c))));
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

/// Replays a recorded frame, with the logical origin at `rect.min`.
fn paint_draw_list(painter: &egui::Painter, rect: egui::Rect, list: &DrawList) {
    let to_screen = |p: DVec2| rect.min + egui::vec2(p.x as f32, p.y as f32);

    for cmd in list.commands() {
        match *cmd {
            // The panel background is already cleared by egui.
            DrawCmd::Clear { .. } => {}
            DrawCmd::LinearGradient {
                area,
                from,
                to,
                start,
                end,
            } => {
                painter.add(egui::Shape::mesh(gradient_mesh(
                    area, from, to, start, end, to_screen,
                )));
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(to_screen(center), radius as f32, to_color32(color));
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => {
                painter.line_segment(
                    [to_screen(from), to_screen(to)],
                    egui::Stroke::new(width as f32, to_color32(color)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frame(viewer: &mut Viewer, ctx: &egui::Context) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| viewer.ui(ctx));
    }

    #[test]
    fn first_frame_initializes_running_field() {
        let ctx = egui::Context::default();
        let mut viewer = Viewer::new(Config::default(), false, Some(7));

        run_frame(&mut viewer, &ctx);

        let field = viewer.field.as_ref().expect("field initialized");
        assert_eq!(field.state(), LifecycleState::Running);
        assert_eq!(field.particles().len(), 80);
        assert!(field.frames_rendered() >= 1);
        assert!(field.pending_frame().is_some());
    }

    #[test]
    fn reduced_motion_viewer_keeps_a_static_frame() {
        let ctx = egui::Context::default();
        let mut viewer = Viewer::new(Config::default(), true, Some(7));

        run_frame(&mut viewer, &ctx);
        run_frame(&mut viewer, &ctx);

        let field = viewer.field.as_ref().expect("field initialized");
        assert_eq!(field.state(), LifecycleState::Paused);
        assert_eq!(field.particles().len(), 30);
        assert!(field.pending_frame().is_none());
        let list = field.container().backing().expect("panel has a surface");
        assert!(!list.is_blank());
    }

    #[test]
    fn torn_down_field_is_not_restarted_until_cleared() {
        let ctx = egui::Context::default();
        let mut viewer = Viewer::new(Config::default(), false, Some(7));
        run_frame(&mut viewer, &ctx);

        viewer.field.as_mut().unwrap().teardown();
        run_frame(&mut viewer, &ctx);
        assert_eq!(
            viewer.field.as_ref().unwrap().state(),
            LifecycleState::Destroyed
        );

        viewer.field = None;
        run_frame(&mut viewer, &ctx);
        assert_eq!(
            viewer.field.as_ref().unwrap().state(),
            LifecycleState::Running
        );
    }

    #[test]
    fn to_color32_scales_alpha() {
        let c = to_color32(Color::rgba(180, 235, 255, 0.8));
        assert_eq!(c, egui::Color32::from_rgba_unmultiplied(180, 235, 255, 204));

        let clamped = to_color32(Color::rgba(0, 0, 0, 2.0));
        assert_eq!(clamped.a(), 255);
    }

    #[test]
    fn gradient_mesh_colors_corners_along_diagonal() {
        let start = Color::rgba(0, 0, 0, 1.0);
        let end = Color::rgba(200, 100, 50, 1.0);
        let area = Bounds::new(100.0, 100.0);

        let mesh = gradient_mesh(area, DVec2::ZERO, area.max_corner(), start, end, |p| {
            egui::pos2(p.x as f32, p.y as f32)
        });

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.vertices[0].color, to_color32(start));
        assert_eq!(mesh.vertices[2].color, to_color32(end));
        // Off-diagonal corners of a square sit halfway along the gradient.
        assert_eq!(mesh.vertices[1].color, to_color32(lerp_color(start, end, 0.5)));
        assert_eq!(mesh.vertices[3].pos, egui::pos2(0.0, 100.0));
    }
}
