//! Laminar flow of a viscous fluid through a capillary, visualized with a
//! fixed ensemble of tracer particles.
//!
//! The [`engine::Engine`] owns all simulation state. A host calls
//! [`engine::Engine::update_parameters`] whenever the user edits the fluid or
//! the geometry, [`engine::Engine::tick`] once per frame, and draws the
//! returned [`engine::FrameSnapshot`].

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod fluid;
pub mod jitter;
pub mod params;
pub mod particle;
pub mod regime;

pub use engine::{BoundaryPolicy, Engine, EngineConfig, FlowModel, FrameSnapshot};
pub use error::{FlowError, Result};
pub use params::ParameterSet;
