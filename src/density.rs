use glam::Vec2;

use crate::kernel::SmoothingKernel;

/// Accumulated kernel weights over the window-sized grid. Rebuilt from
/// scratch every tick: clear, splat every particle, normalize.
#[derive(Debug, Clone)]
pub struct DensityField {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<f32>,
}

impl DensityField {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0.0; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(0.0);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.cells[y * self.width + x]
    }

    /// Add the kernel into the field centered at the particle's rounded
    /// position. The destination window and the kernel sub-window are
    /// clipped together so they stay congruent.
    pub fn splat(&mut self, pos: Vec2, kernel: &SmoothingKernel) {
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
                self.cells[row + x as usize] += kernel.weight(kx, ky);
            }
        }
    }

    /// Scale the field by its running maximum so sampled magnitudes stay in
    /// [0, 1] regardless of how crowded a frame is. An all-zero field is
    /// left untouched; dividing by a zero maximum would put NaN into every
    /// downstream velocity.
    pub fn normalize(&mut self) {
        let max = self.cells.iter().cloned().fold(0.0f32, f32::max);
        if max <= 0.0 {
            return;
        }
        let inv = 1.0 / max;
        for cell in self.cells.iter_mut() {
            *cell *= inv;
        }
    }

    /// Plain average of the cells within `radius` of the rounded position,
    /// window clipped to bounds. Feeds the deceleration step.
    pub fn mean_around(&self, pos: Vec2, radius: usize) -> f32 {
        let r = radius as i32;
        let cx = pos.x.round() as i32;
        let cy = pos.y.round() as i32;

        let x0 = (cx - r).max(0);
        let y0 = (cy - r).max(0);
        let x1 = (cx + r).min(self.width as i32 - 1);
        let y1 = (cy + r).min(self.height as i32 - 1);
        if x1 < x0 || y1 < y0 {
            return 0.0;
        }

        let mut sum = 0.0;
        for y in y0..=y1 {
            let row = y as usize * self.width;
            for x in x0..=x1 {
                sum += self.cells[row + x as usize];
            }
        }
        let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f32;
        sum / count
    }
}
