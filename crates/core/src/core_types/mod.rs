//! Core types and utilities

pub mod config;
pub mod particle;
pub mod units;
pub mod vec2;

pub use config::{FireRules, LifeRange, ParticleConfig, SimulationConfig, ValueRange};
pub use particle::{EmissionEvent, Particle, ParticleKind, Rgba};
pub use units::{Degrees, Radians};
pub use vec2::Vec2;
