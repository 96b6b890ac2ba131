use glam::Vec2;

use crate::density::DensityField;
use crate::kernel::{PointerKernel, SmoothingKernel};

/// Density read for an off-grid neighbor. Walls look full, so edge cells
/// never win the "most empty neighbor" comparison by artifact.
const EDGE_DENSITY: f32 = 1.0;

/// Neighbor probe order; ties resolve to the earliest entry.
const DIRS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Per-cell flow vectors derived from the density field's local gradient.
/// Each cell points toward its least-dense axis neighbor, scaled by the
/// cell's own density, so empty regions carry no flow no matter how empty
/// their surroundings are.
#[derive(Debug, Clone)]
pub struct FlowField {
    pub width: usize,
    pub height: usize,
    pub flow_x: Vec<f32>,
    pub flow_y: Vec<f32>,
}

impl FlowField {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            flow_x: vec![0.0; width * height],
            flow_y: vec![0.0; width * height],
        }
    }

    /// Pure function of the current density field; no memory of the
    /// previous flow state survives a rebuild.
    pub fn rebuild(&mut self, density: &DensityField) {
        let w = self.width as i32;
        let h = self.height as i32;

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;

                let mut best = 0;
                let mut best_density = f32::INFINITY;
                for (i, (dx, dy)) in DIRS.iter().enumerate() {
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    let neighbor = if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        EDGE_DENSITY
                    } else {
                        density.cells[ny as usize * self.width + nx as usize]
                    };
                    if neighbor < best_density {
                        best_density = neighbor;
                        best = i;
                    }
                }

                let local = density.cells[idx];
                self.flow_x[idx] = DIRS[best].0 as f32 * local;
                self.flow_y[idx] = DIRS[best].1 as f32 * local;
            }
        }
    }

    /// Additively inject the pointer kernel centered at `pos`. `sign` is +1
    /// for the repelling button and -1 for the attracting one. The residual
    /// only lives until the next rebuild unless the button stays held.
    pub fn apply_pointer(&mut self, kernel: &PointerKernel, pos: Vec2, sign: f32) {
        let r = kernel.radius as i32;
        let cx = pos.x.round() as i32;
        let cy = pos.y.round() as i32;

        let x0 = (cx - r).max(0);
        let y0 = (cy - r).max(0);
        let x1 = (cx + r).min(self.width as i32 - 1);
        let y1 = (cy + r).min(self.height as i32 - 1);
        if x1 < x0 || y1 < y0 {
            return;
        }

        for y in y0..=y1 {
            let ky = (y - (cy - r)) as usize;
            let row = y as usize * self.width;
            for x in x0..=x1 {
                let kx = (x - (cx - r)) as usize;
                let k = ky * kernel.size + kx;
                let idx = row + x as usize;
                self.flow_x[idx] += sign * kernel.dir_x[k] * kernel.magnitude[k];
                self.flow_y[idx] += sign * kernel.dir_y[k] * kernel.magnitude[k];
            }
        }
    }

    /// Kernel-weighted sum of the flow vectors around the rounded position.
    /// Particles read this instead of a single cell to smooth out grid
    /// discretization noise.
    pub fn sample(&self, pos: Vec2, kernel: &SmoothingKernel) -> Vec2 {
        let r = kernel.radius as i32;
        let cx = pos.x.round() as i32;
        let cy = pos.y.round() as i32;

        let x0 = (cx - r).max(0);
        let y0 = (cy - r).max(0);
        let x1 = (cx + r).min(self.width as i32 - 1);
        let y1 = (cy + r).min(self.height as i32 - 1);
        if x1 < x0 || y1 < y0 {
            return Vec2::ZERO;
        }

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        for y in y0..=y1 {
            let ky = (y - (cy - r)) as usize;
            let row = y as usize * self.width;
            for x in x0..=x1 {
                let kx = (x - (cx - r)) as usize;
                let weight = kernel.weight(kx, ky);
                let idx = row + x as usize;
                sum_x += self.flow_x[idx] * weight;
                sum_y += self.flow_y[idx] * weight;
            }
        }
        Vec2::new(sum_x, sum_y)
    }
}
