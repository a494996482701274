//! Generative background animations.
//!
//! Two independent engines are provided, each implementing
//! [`backdrop_core::Backdrop`]:
//!
//! - [`GameOfLife`], a toroidal Conway automaton drawn as a dim grid whose
//!   cells crossfade between generations;
//! - [`StarField`], twinkling stars with scroll parallax plus occasional
//!   shooting stars and drifting planets, faded in and out by an external
//!   activity signal.
//!
//! Both engines take an injectable [`rand::Rng`] so tests can run them
//! deterministically.

mod ease;
pub mod life;
mod palette;
pub mod starfield;

pub use life::GameOfLife;
pub use starfield::StarField;
