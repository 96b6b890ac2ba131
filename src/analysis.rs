use rayon::prelude::*;

use crate::sim::Simulation;

/// Per-frame aggregates for headless runs. Nothing here feeds back into
/// the dynamics.
#[derive(Debug, Clone)]
pub struct SimMetrics {
    pub frame: usize,
    pub particle_count: usize,
    pub mean_speed: f32,
    pub max_speed: f32,
    pub kinetic_energy: f32,
    pub mean_density: f32,
    pub max_density: f32,
    pub occupied_fraction: f32,
}

impl SimMetrics {
    pub fn analyze(sim: &Simulation, frame: usize) -> Self {
        let particle_count = sim.particles.len();

        let (speed_sum, max_speed, kinetic_energy) = sim
            .particles
            .par_iter()
            .map(|p| (p.speed, p.speed, 0.5 * p.speed * p.speed))
            .reduce(
                || (0.0f32, 0.0f32, 0.0f32),
                |(sum_a, max_a, ke_a), (sum_b, max_b, ke_b)| {
                    (sum_a + sum_b, max_a.max(max_b), ke_a + ke_b)
                },
            );

        let cell_count = sim.density.cells.len();
        let mut density_sum = 0.0f32;
        let mut max_density = 0.0f32;
        let mut occupied = 0usize;
        for &cell in &sim.density.cells {
            density_sum += cell;
            max_density = max_density.max(cell);
            if cell > 0.01 {
                occupied += 1;
            }
        }

        Self {
            frame,
            particle_count,
            mean_speed: if particle_count > 0 {
                speed_sum / particle_count as f32
            } else {
                0.0
            },
            max_speed,
            kinetic_energy,
            mean_density: density_sum / cell_count as f32,
            max_density,
            occupied_fraction: occupied as f32 / cell_count as f32,
        }
    }

    pub fn print_summary(&self) {
        println!("Frame {} Metrics:", self.frame);
        println!("  Particles: {}", self.particle_count);
        println!("  Mean Speed: {:.6}", self.mean_speed);
        println!("  Max Speed: {:.6}", self.max_speed);
        println!("  Kinetic Energy: {:.6}", self.kinetic_energy);
        println!("  Mean Density: {:.6}", self.mean_density);
        println!("  Max Density: {:.6}", self.max_density);
        println!("  Occupied Fraction: {:.4}", self.occupied_fraction);
        println!();
    }
}

pub struct AnalysisRecorder {
    pub metrics_history: Vec<SimMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self {
            metrics_history: Vec::new(),
        }
    }

    pub fn record_frame(&mut self, sim: &Simulation, frame: usize) {
        self.metrics_history.push(SimMetrics::analyze(sim, frame));
    }

    pub fn print_trends(&self) {
        if self.metrics_history.len() < 2 {
            return;
        }

        let first = &self.metrics_history[0];
        let last = &self.metrics_history[self.metrics_history.len() - 1];

        println!("=== TREND ANALYSIS ===");
        println!(
            "Kinetic Energy: {:.6} -> {:.6} ({:+.3}%)",
            first.kinetic_energy,
            last.kinetic_energy,
            (last.kinetic_energy - first.kinetic_energy) / first.kinetic_energy.max(0.001) * 100.0
        );
        println!(
            "Occupied Fraction: {:.4} -> {:.4} ({:+.3}%)",
            first.occupied_fraction,
            last.occupied_fraction,
            (last.occupied_fraction - first.occupied_fraction)
                / first.occupied_fraction.max(0.001)
                * 100.0
        );
        println!(
            "Particles: {} -> {}",
            first.particle_count, last.particle_count
        );
    }
}

impl Default for AnalysisRecorder {
    fn default() -> Self {
        Self::new()
    }
}
