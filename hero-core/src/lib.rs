//! Core of the animated hero particle field.
//!
//! Main components:
//! - [`particle`] — particles and the per-generation particle store.
//! - [`phases`] — per-frame stepping and proximity linking.
//! - [`edge_buffer`] — scratch buffer for the edges of one frame.
//! - [`render`] — frame painting over an abstract drawing surface.
//! - [`lifecycle`] — sizing, frame scheduling and pause/resume handling.
//! - [`config`] — tunables for all of the above.
//! - [`error`] — error type.
//! - [`types`] — shared ids and geometry.

pub mod config;
pub mod edge_buffer;
pub mod error;
pub mod lifecycle;
pub mod particle;
pub mod phases;
pub mod render;
pub mod types;
