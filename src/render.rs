use image::{ImageBuffer, Rgb, RgbImage};

use crate::sim::Simulation;

pub struct Renderer {
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Heat map of the normalized density field. Blue for empty cells,
    /// toward white as crowding rises.
    pub fn render_density(&self, sim: &Simulation) -> RgbImage {
        let mut img = ImageBuffer::new(self.width, self.height);

        let scale_x = self.width as f32 / sim.density.width as f32;
        let scale_y = self.height as f32 / sim.density.height as f32;

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let sim_x = (x as f32 / scale_x) as usize;
            let sim_y = (y as f32 / scale_y) as usize;

            if sim_x < sim.density.width && sim_y < sim.density.height {
                let density = sim.density.get(sim_x, sim_y).clamp(0.0, 1.0);
                let intensity = (density * 255.0) as u8;
                *pixel = Rgb([intensity, intensity, 255]);
            } else {
                *pixel = Rgb([0, 0, 0]);
            }
        }

        img
    }

    /// Pseudo-color blit of the flow field: x magnitude in red, y in green.
    pub fn render_flow(&self, sim: &Simulation) -> RgbImage {
        let mut img = ImageBuffer::new(self.width, self.height);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let sim_x = (x as f32 / self.width as f32 * sim.flow.width as f32) as usize;
            let sim_y = (y as f32 / self.height as f32 * sim.flow.height as f32) as usize;

            if sim_x < sim.flow.width && sim_y < sim.flow.height {
                let idx = sim_y * sim.flow.width + sim_x;
                let flow_x = sim.flow.flow_x[idx];
                let flow_y = sim.flow.flow_y[idx];

                let r = (flow_x.abs() * 255.0).min(255.0) as u8;
                let g = (flow_y.abs() * 255.0).min(255.0) as u8;
                *pixel = Rgb([r, g, 128]);
            } else {
                *pixel = Rgb([0, 0, 0]);
            }
        }

        img
    }

    /// Particles as filled circles over a black background.
    pub fn render_particles(&self, sim: &Simulation) -> RgbImage {
        let mut img: RgbImage = ImageBuffer::new(self.width, self.height);

        let scale_x = self.width as f32 / sim.config.width as f32;
        let scale_y = self.height as f32 / sim.config.height as f32;
        let scale_r = scale_x.min(scale_y);

        for particle in &sim.particles {
            let cx = particle.pos.x * scale_x;
            let cy = particle.pos.y * scale_y;
            let radius = (particle.radius * scale_r).max(1.0);

            let x0 = (cx - radius).floor().max(0.0) as u32;
            let y0 = (cy - radius).floor().max(0.0) as u32;
            let x1 = ((cx + radius).ceil() as u32).min(self.width - 1);
            let y1 = ((cy + radius).ceil() as u32).min(self.height - 1);

            for py in y0..=y1 {
                for px in x0..=x1 {
                    let dx = px as f32 - cx;
                    let dy = py as f32 - cy;
                    if dx * dx + dy * dy <= radius * radius {
                        img.put_pixel(px, py, Rgb(particle.color));
                    }
                }
            }
        }

        img
    }
}
