use eframe::egui;

use crate::sim::{FeatureToggles, PointerState, Simulation, TickInput};

pub struct InteractiveApp {
    simulation: Simulation,
    toggles: FeatureToggles,
    paused: bool,
    frame_count: usize,
    cell_size: f32,
    field_texture: Option<egui::TextureHandle>,
}

impl InteractiveApp {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            toggles: FeatureToggles {
                gravity: true,
                jitter: false,
                deceleration: true,
                show_field: false,
                spawn: false,
            },
            paused: false,
            frame_count: 0,
            cell_size: 1.5,
            field_texture: None,
        }
    }

    fn reset(&mut self) {
        if let Ok(sim) = Simulation::new(self.simulation.config.clone()) {
            self.simulation = sim;
            self.frame_count = 0;
        }
    }

    fn density_image(&self) -> egui::ColorImage {
        let width = self.simulation.density.width;
        let height = self.simulation.density.height;
        let pixels = self
            .simulation
            .density
            .cells
            .iter()
            .map(|&cell| {
                let intensity = (cell.clamp(0.0, 1.0) * 255.0) as u8;
                egui::Color32::from_rgb(intensity, intensity, 255)
            })
            .collect();
        egui::ColorImage {
            size: [width, height],
            pixels,
        }
    }
}

/// Brighten the base color toward white as the particle speeds up.
fn speed_color(base: [u8; 3], speed: f32) -> egui::Color32 {
    let t = (speed / 5.0).clamp(0.0, 1.0);
    let lift = |c: u8| c.saturating_add((t * (255 - c) as f32) as u8);
    egui::Color32::from_rgb(lift(base[0]), lift(base[1]), lift(base[2]))
}

impl eframe::App for InteractiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("puddle - Interactive Particle Fluid");

            ui.horizontal(|ui| {
                if ui.button("Pause/Resume").clicked() {
                    self.paused = !self.paused;
                }
                if ui.button("Reset").clicked() {
                    self.reset();
                }
                ui.add(egui::Slider::new(&mut self.cell_size, 1.0..=4.0).text("Cell Size"));
            });

            ui.horizontal(|ui| {
                ui.checkbox(&mut self.toggles.gravity, "Gravity");
                ui.checkbox(&mut self.toggles.jitter, "Jitter");
                ui.checkbox(&mut self.toggles.deceleration, "Deceleration");
                ui.checkbox(&mut self.toggles.show_field, "Density Field");
                ui.checkbox(&mut self.toggles.spawn, "Spawn");
            });

            ui.separator();

            let canvas_width = self.simulation.config.width as f32 * self.cell_size;
            let canvas_height = self.simulation.config.height as f32 * self.cell_size;

            let (rect, response) = ui.allocate_exact_size(
                egui::Vec2::new(canvas_width, canvas_height),
                egui::Sense::click_and_drag(),
            );

            // Pointer state is sampled once here and held for the tick.
            let mut pointer = PointerState::default();
            if let Some(pos) = response.interact_pointer_pos() {
                let x = (pos.x - rect.left()) / self.cell_size;
                let y = (pos.y - rect.top()) / self.cell_size;

                if x >= 0.0
                    && y >= 0.0
                    && x < self.simulation.config.width as f32
                    && y < self.simulation.config.height as f32
                {
                    let primary = ctx.input(|i| i.pointer.primary_down());
                    let secondary = ctx.input(|i| i.pointer.secondary_down());
                    pointer = PointerState {
                        x,
                        y,
                        left_held: primary && !secondary,
                        right_held: secondary && !primary,
                    };
                }
            }

            if !self.paused {
                let input = TickInput {
                    toggles: self.toggles,
                    pointer,
                };
                self.simulation.tick(&input);
                self.frame_count += 1;
            }

            let painter = ui.painter();

            if self.toggles.show_field {
                let image = self.density_image();
                let texture = self.field_texture.get_or_insert_with(|| {
                    ctx.load_texture("density", image.clone(), egui::TextureOptions::LINEAR)
                });
                texture.set(image, egui::TextureOptions::LINEAR);
                painter.image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            } else {
                painter.rect_filled(rect, 0.0, egui::Color32::BLACK);
            }

            for particle in &self.simulation.particles {
                let center = egui::Pos2::new(
                    rect.left() + particle.pos.x * self.cell_size,
                    rect.top() + particle.pos.y * self.cell_size,
                );
                painter.circle_filled(
                    center,
                    particle.radius * self.cell_size,
                    speed_color(particle.color, particle.speed),
                );
            }

            ui.label(format!(
                "Frame: {} | Particles: {} | Left-drag: push | Right-drag: pull",
                self.frame_count,
                self.simulation.particles.len()
            ));
        });

        ctx.request_repaint();
    }
}
