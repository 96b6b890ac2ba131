use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Everything the simulation is parameterized by, fixed at startup.
/// Validated once before the tick loop starts; the loop itself assumes a
/// valid configuration and never re-checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub particle_count: usize,
    pub particle_radius: f32,
    pub particle_color: [u8; 3],
    pub gravity: f32,
    pub wall_damping: f32,
    pub dt: f32,
    /// Radius of the kernel particles splat into the density field.
    pub density_radius: usize,
    /// Radius of the kernel particles sample the flow field with.
    pub sample_radius: usize,
    pub pointer_radius: usize,
    pub pointer_strength: f32,
    /// Scale applied to the sampled flow vector before it feeds velocity.
    pub flow_strength: f32,
    /// Ticks between spawned particles while the spawn toggle is held.
    pub spawn_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            particle_count: 150,
            particle_radius: 4.0,
            particle_color: [0, 255, 0],
            gravity: 9.81,
            wall_damping: 0.6,
            dt: 0.1,
            density_radius: 20,
            sample_radius: 10,
            pointer_radius: 60,
            pointer_strength: 4.0,
            flow_strength: 1.0,
            spawn_interval: 4,
        }
    }
}

impl SimConfig {
    pub fn load_json(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyField);
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::BadTimeStep(self.dt));
        }
        let min_dim = self.width.min(self.height);
        for (name, radius) in [
            ("density_radius", self.density_radius),
            ("sample_radius", self.sample_radius),
            ("pointer_radius", self.pointer_radius),
        ] {
            if radius == 0 {
                return Err(ConfigError::ZeroRadius(name));
            }
            // A kernel window wider than the field would overrun every edge
            // at once; sampling degenerates long before that.
            if min_dim < 2 * radius {
                return Err(ConfigError::FieldTooSmall { name, radius });
            }
        }
        if !self.particle_radius.is_finite() || self.particle_radius < 0.0 {
            return Err(ConfigError::BadParticleRadius(self.particle_radius));
        }
        if 2.0 * self.particle_radius >= min_dim as f32 {
            return Err(ConfigError::BadParticleRadius(self.particle_radius));
        }
        if self.particle_count > self.seed_capacity() {
            return Err(ConfigError::TooManyParticles {
                count: self.particle_count,
                capacity: self.seed_capacity(),
            });
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        Ok(())
    }

    /// Spacing of the packed seed layout.
    pub fn seed_spacing(&self) -> f32 {
        (2.0 * self.particle_radius + 2.0).max(4.0)
    }

    pub fn seed_margin(&self) -> f32 {
        self.particle_radius + 1.0
    }

    /// How many particles the packed grid layout can hold inside bounds.
    pub fn seed_capacity(&self) -> usize {
        let spacing = self.seed_spacing();
        let cols = ((self.width as f32 - 2.0 * self.seed_margin()) / spacing).floor() as usize + 1;
        let rows = ((self.height as f32 - 2.0 * self.seed_margin()) / spacing).floor() as usize + 1;
        cols * rows
    }

    pub fn seed_columns(&self) -> usize {
        ((self.width as f32 - 2.0 * self.seed_margin()) / self.seed_spacing()).floor() as usize + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyField,
    BadTimeStep(f32),
    ZeroRadius(&'static str),
    FieldTooSmall { name: &'static str, radius: usize },
    BadParticleRadius(f32),
    TooManyParticles { count: usize, capacity: usize },
    ZeroSpawnInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField => write!(f, "field width and height must be nonzero"),
            Self::BadTimeStep(dt) => write!(f, "time step must be finite and positive, got {dt}"),
            Self::ZeroRadius(name) => write!(f, "{name} must be at least 1"),
            Self::FieldTooSmall { name, radius } => {
                write!(f, "field must be at least twice {name} ({radius}) on each side")
            }
            Self::BadParticleRadius(r) => {
                write!(f, "particle radius {r} does not fit the field")
            }
            Self::TooManyParticles { count, capacity } => {
                write!(f, "{count} particles exceed the packed layout capacity of {capacity}")
            }
            Self::ZeroSpawnInterval => write!(f, "spawn interval must be at least 1 tick"),
        }
    }
}

impl std::error::Error for ConfigError {}
