//! egui-side implementations of the host traits the particle field needs.

use hero_core::{
    lifecycle::{Container, Environment, FrameScheduler, FrameTicket},
    render::DrawList,
    types::Bounds,
};

/// The central panel, acting as the field's container.
///
/// egui repaints everything each frame, so the panel keeps the last frame
/// in a retained [`DrawList`] that the viewer replays on every update.
pub struct PanelContainer {
    size: Bounds,
    surface: Option<DrawList>,
}

impl PanelContainer {
    pub fn new(size: Bounds) -> Self {
        Self {
            size,
            surface: Some(DrawList::default()),
        }
    }

    pub fn set_size(&mut self, size: Bounds) {
        self.size = size;
    }

    pub fn backing(&self) -> Option<&DrawList> {
        self.surface.as_ref()
    }
}

impl Container for PanelContainer {
    type Surface = DrawList;

    fn client_size(&self) -> Bounds {
        self.size
    }

    fn surface(&mut self) -> Option<&mut DrawList> {
        self.surface.as_mut()
    }
}

/// Frame scheduler on top of egui repaint requests.
///
/// egui cannot withdraw a repaint request, so cancelling only forgets the
/// ticket; the extra repaint then finds nothing due.
pub struct RepaintScheduler {
    ctx: egui::Context,
    next: u64,
    due: Option<FrameTicket>,
}

impl RepaintScheduler {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            next: 0,
            due: None,
        }
    }
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) -> FrameTicket {
        self.next += 1;
        let ticket = FrameTicket(self.next);
        self.due = Some(ticket);
        self.ctx.request_repaint();
        ticket
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        if self.due == Some(ticket) {
            self.due = None;
        }
    }

    fn take_due(&mut self) -> Option<FrameTicket> {
        self.due.take()
    }
}

/// Environment as seen by the viewer for the current egui frame.
#[derive(Clone, Copy, Debug)]
pub struct HostSignals {
    pub reduced_motion: bool,
    pub pixels_per_point: f32,
}

impl Environment for HostSignals {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn device_pixel_ratio(&self) -> f64 {
        f64::from(self.pixels_per_point)
    }
}
