use std::path::Path;

use crate::render::Renderer;
use crate::sim::{Simulation, TickInput};

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn export_density_png(
        &self,
        sim: &Simulation,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.renderer.render_density(sim).save(path)?;
        Ok(())
    }

    pub fn export_flow_png(
        &self,
        sim: &Simulation,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.renderer.render_flow(sim).save(path)?;
        Ok(())
    }

    pub fn export_particles_png(
        &self,
        sim: &Simulation,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.renderer.render_particles(sim).save(path)?;
        Ok(())
    }

    /// Tick the simulation `steps` times with a fixed input, saving a
    /// particle frame after each step.
    pub fn export_frame_sequence(
        &self,
        sim: &mut Simulation,
        input: &TickInput,
        steps: usize,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for i in 0..steps {
            sim.tick(input);

            let filename = format!("{}_frame_{:04}.png", prefix, i);
            self.export_particles_png(sim, &output_dir.join(filename))?;
        }
        Ok(())
    }
}
