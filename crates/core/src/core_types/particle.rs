//! Flame and smoke particles
//!
//! Particles are purely visual: they never feed back into the cell state machine.
//! Burning cells emit them, the wind steers smoke, and each particle fades out over
//! its lifetime.
//!
//! # Motion Model
//!
//! 1. **Advection** - explicit Euler, one unit time-step per tick: `p += v`
//! 2. **Wind drift** - smoke only: `v += unit(wind) × strength × k` every tick
//! 3. **Diffusion** - smoke only: size grows by a fixed amount each tick
//! 4. **Ageing** - `life -= 1`; the particle is dead at zero
//!
//! # Example
//!
//! ```
//! use forest_fire_core::{Particle, ParticleKind, Rgba, Vec2};
//!
//! let mut flame = Particle::new(
//!     ParticleKind::Flame,
//!     Vec2::new(10.5, 10.5),
//!     Vec2::new(0.0, -0.3),
//!     3.0,
//!     2,
//!     Rgba::new(255, 150, 0, 200),
//! );
//!
//! assert!(flame.update(Vec2::zeros(), 0.0));
//! assert!(!flame.update(Vec2::zeros(), 0.0));
//! assert!(flame.position().y < 10.5);
//! ```

use crate::core_types::config::{LifeRange, ParticleConfig, ValueRange};
use crate::core_types::vec2::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Flame particles: full red, random green, no blue.
const FLAME_RED: u8 = 255;
const FLAME_GREEN: (u8, u8) = (100, 200);
const FLAME_ALPHA: (u8, u8) = (150, 250);

/// Smoke particles: neutral gray, translucent.
const SMOKE_GRAY: u8 = 100;
const SMOKE_ALPHA: (u8, u8) = (50, 150);

/// Which branch of the emission rule produced a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ParticleKind {
    Flame = 0,
    Smoke = 1,
}

impl ParticleKind {
    /// Convert to u8 for FFI compatibility
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert from u8 for FFI compatibility
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ParticleKind::Flame),
            1 => Some(ParticleKind::Smoke),
            _ => None,
        }
    }

    /// Maximum spawn life for this kind; the fade-out normalisation constant.
    pub fn max_life(self, config: &ParticleConfig) -> u32 {
        self.life_range(config).max
    }

    fn life_range(self, config: &ParticleConfig) -> LifeRange {
        match self {
            ParticleKind::Flame => config.flame_life,
            ParticleKind::Smoke => config.smoke_life,
        }
    }
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Request from the grid step to spawn one particle at a burning cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionEvent {
    pub kind: ParticleKind,
    pub x: usize,
    pub y: usize,
}

/// A single flame or smoke particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub(crate) kind: ParticleKind,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) size: f32,
    pub(crate) life: u32,
    pub(crate) color: Rgba,
}

impl Particle {
    /// Create a particle directly.
    ///
    /// Burning cells spawn particles through the particle system; this is for drivers
    /// and tests that need an exact lifetime.
    pub fn new(
        kind: ParticleKind,
        position: Vec2,
        velocity: Vec2,
        size: f32,
        life: u32,
        color: Rgba,
    ) -> Self {
        Particle {
            kind,
            position,
            velocity,
            size,
            life,
            color,
        }
    }

    /// Advance one tick. Returns `false` once the particle has expired.
    ///
    /// `wind_accel` is the per-tick velocity nudge applied to smoke and `smoke_growth`
    /// the per-tick size increase; both are ignored for flames.
    pub fn update(&mut self, wind_accel: Vec2, smoke_growth: f32) -> bool {
        self.position += self.velocity;

        if self.kind == ParticleKind::Smoke {
            self.velocity += wind_accel;
            self.size += smoke_growth;
        }

        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    /// Fade factor for drawing: `life / max_life`, clamped to `[0, 1]`.
    ///
    /// Uses the kind's maximum spawn life, not this particle's own starting life, so
    /// every particle of a kind fades along the same line.
    pub fn alpha(&self, config: &ParticleConfig) -> f32 {
        let max_life = self.kind.max_life(config).max(1);
        (self.life as f32 / max_life as f32).min(1.0)
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn is_smoke(&self) -> bool {
        self.kind == ParticleKind::Smoke
    }

    /// Position in grid coordinates (cells)
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Velocity in cells per tick
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Render diameter
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Ticks remaining
    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn color(&self) -> Rgba {
        self.color
    }
}

/// Spawn a flame at the centre of cell `(x, y)`.
///
/// Flames rise fast, jitter sideways a little and die young.
pub(crate) fn spawn_flame<R: Rng + ?Sized>(
    x: usize,
    y: usize,
    config: &ParticleConfig,
    rng: &mut R,
) -> Particle {
    let position = Vec2::new(
        x as f32 + 0.5 + jitter(rng, config.spawn_jitter),
        y as f32 + 0.5 + jitter(rng, config.spawn_jitter),
    );
    let velocity = Vec2::new(
        jitter(rng, config.flame_drift),
        -sample(rng, config.flame_rise),
    );

    Particle::new(
        ParticleKind::Flame,
        position,
        velocity,
        sample(rng, config.flame_size),
        sample_life(rng, config.flame_life),
        Rgba::new(
            FLAME_RED,
            rng.random_range(FLAME_GREEN.0..=FLAME_GREEN.1),
            0,
            rng.random_range(FLAME_ALPHA.0..=FLAME_ALPHA.1),
        ),
    )
}

/// Spawn smoke at the top edge of cell `(x, y)`.
///
/// `wind_velocity` is `unit(wind) × strength`; it pre-biases the initial velocity so
/// smoke leans downwind from its first tick.
pub(crate) fn spawn_smoke<R: Rng + ?Sized>(
    x: usize,
    y: usize,
    wind_velocity: Vec2,
    config: &ParticleConfig,
    rng: &mut R,
) -> Particle {
    let position = Vec2::new(
        x as f32 + 0.5 + jitter(rng, config.spawn_jitter),
        y as f32 + jitter(rng, config.spawn_jitter),
    );
    let velocity = Vec2::new(
        jitter(rng, config.smoke_drift),
        -sample(rng, config.smoke_rise),
    ) + wind_velocity * config.smoke_spawn_wind_factor;

    Particle::new(
        ParticleKind::Smoke,
        position,
        velocity,
        sample(rng, config.smoke_size),
        sample_life(rng, config.smoke_life),
        Rgba::new(
            SMOKE_GRAY,
            SMOKE_GRAY,
            SMOKE_GRAY,
            rng.random_range(SMOKE_ALPHA.0..=SMOKE_ALPHA.1),
        ),
    )
}

/// Uniform sample in `[-half_width, half_width)`; zero when the width is zero.
fn jitter<R: Rng + ?Sized>(rng: &mut R, half_width: f32) -> f32 {
    if half_width > 0.0 {
        rng.random_range(-half_width..half_width)
    } else {
        0.0
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: ValueRange) -> f32 {
    if range.max > range.min {
        rng.random_range(range.min..range.max)
    } else {
        range.min
    }
}

fn sample_life<R: Rng + ?Sized>(rng: &mut R, range: LifeRange) -> u32 {
    rng.random_range(range.min..=range.max)
}
