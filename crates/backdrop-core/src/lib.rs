//! Core types shared by the backdrop engines and their hosts.
//!
//! This crate defines the drawing surface abstraction and the in-memory
//! raster that implements it, the [`Backdrop`] engine contract, the
//! scheduling primitives that drive engines from any clock, and the
//! settings each engine is mounted with.

mod activity;
mod canvas;
mod color;
mod config;
mod engine;
mod geometry;
pub mod schedule;
mod surface;

pub use activity::ActivitySignal;
pub use canvas::PixelCanvas;
pub use color::Rgba;
pub use config::{LifeConfig, StarfieldConfig};
pub use engine::Backdrop;
pub use geometry::{Point, Rect, Viewport};
pub use surface::Surface;
