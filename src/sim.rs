use glam::Vec2;
use rayon::prelude::*;

use crate::config::{ConfigError, SimConfig};
use crate::density::DensityField;
use crate::flow::FlowField;
use crate::kernel::{PointerKernel, SmoothingKernel};
use crate::particle::Particle;

/// Feature switches sampled once per tick. The UI layer owns how they are
/// toggled; the simulation only ever reads them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureToggles {
    pub gravity: bool,
    pub jitter: bool,
    pub deceleration: bool,
    /// Render-side only; carried here so one value describes the frame.
    pub show_field: bool,
    pub spawn: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub left_held: bool,
    pub right_held: bool,
}

/// Everything external the simulation observes during one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub toggles: FeatureToggles,
    pub pointer: PointerState,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    pub config: SimConfig,
    pub particles: Vec<Particle>,
    pub density: DensityField,
    pub flow: FlowField,
    density_kernel: SmoothingKernel,
    sample_kernel: SmoothingKernel,
    pointer_kernel: PointerKernel,
    ticks: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let particles = seed_particles(&config);
        log::info!(
            "simulation ready: {} particles on a {}x{} field",
            particles.len(),
            config.width,
            config.height
        );

        Ok(Self {
            density: DensityField::new(config.width, config.height),
            flow: FlowField::new(config.width, config.height),
            density_kernel: SmoothingKernel::build(config.density_radius),
            sample_kernel: SmoothingKernel::build(config.sample_radius),
            pointer_kernel: PointerKernel::build(config.pointer_radius, config.pointer_strength),
            particles,
            config,
            ticks: 0,
        })
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One full simulation step. Phases run strictly in order; each one
    /// reads the complete output of the previous one.
    pub fn tick(&mut self, input: &TickInput) {
        // Density rebuild: clear, splat every particle, normalize.
        self.density.clear();
        for particle in &self.particles {
            self.density.splat(particle.pos, &self.density_kernel);
        }
        self.density.normalize();

        // Flow rederivation, then the pointer's additive push if a button
        // is held this tick.
        self.flow.rebuild(&self.density);
        let pointer = input.pointer;
        if pointer.left_held || pointer.right_held {
            let sign = if pointer.left_held { 1.0 } else { -1.0 };
            self.flow
                .apply_pointer(&self.pointer_kernel, Vec2::new(pointer.x, pointer.y), sign);
        }

        // Particle update against the frozen fields. Particles are
        // independent once the grids stop changing, so the pass fans out.
        let density = &self.density;
        let flow = &self.flow;
        let sample_kernel = &self.sample_kernel;
        let toggles = input.toggles;
        let config = &self.config;
        self.particles.par_iter_mut().for_each(|particle| {
            particle.update(density, flow, sample_kernel, &toggles, config);
        });

        if input.toggles.spawn && self.ticks % self.config.spawn_interval == 0 {
            let spawned = self.spawn_particle();
            self.particles.push(spawned);
        }

        self.ticks += 1;
    }

    /// New particles drop in at the top center with no velocity.
    fn spawn_particle(&self) -> Particle {
        Particle::new(
            Vec2::new(
                self.config.width as f32 / 2.0,
                self.config.particle_radius + 1.0,
            ),
            self.config.particle_radius,
            self.config.particle_color,
        )
    }
}

/// Packed grid layout inside the bounds, row by row from the top left.
fn seed_particles(config: &SimConfig) -> Vec<Particle> {
    let spacing = config.seed_spacing();
    let margin = config.seed_margin();
    let cols = config.seed_columns();

    (0..config.particle_count)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            Particle::new(
                Vec2::new(
                    margin + col as f32 * spacing,
                    margin + row as f32 * spacing,
                ),
                config.particle_radius,
                config.particle_color,
            )
        })
        .collect()
}
