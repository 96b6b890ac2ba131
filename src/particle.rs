use glam::Vec2;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::config::SimConfig;
use crate::density::DensityField;
use crate::flow::FlowField;
use crate::kernel::SmoothingKernel;
use crate::sim::FeatureToggles;

const JITTER_SCALE: f32 = 3.0;
const DECEL_SCALE: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
    /// |vel| cached after the force pipeline, read by color mapping only.
    pub speed: f32,
}

impl Particle {
    pub fn new(pos: Vec2, radius: f32, color: [u8; 3]) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
            speed: 0.0,
        }
    }

    /// One tick of the velocity/position pipeline. The stage order is part
    /// of the contract: gravity, flow coupling, jitter, deceleration, speed
    /// cache, wall collision with position clamping.
    pub fn update(
        &mut self,
        density: &DensityField,
        flow: &FlowField,
        sample_kernel: &SmoothingKernel,
        toggles: &FeatureToggles,
        config: &SimConfig,
    ) {
        let dt = config.dt;

        if toggles.gravity {
            self.vel.y += config.gravity * dt;
        }

        self.vel += config.flow_strength * dt * flow.sample(self.pos, sample_kernel);

        if toggles.jitter {
            let mut rng = rand::thread_rng();
            let jx: f32 = rng.sample(StandardNormal);
            let jy: f32 = rng.sample(StandardNormal);
            self.vel.x += JITTER_SCALE * dt * jx;
            self.vel.y += JITTER_SCALE * dt * jy;
        }

        if toggles.deceleration {
            // Crowding is a normalized density average, so the factor stays
            // within [1 - DECEL_SCALE, 1] and never flips the velocity.
            let crowding = density.mean_around(self.pos, sample_kernel.radius);
            self.vel *= 1.0 - DECEL_SCALE * crowding;
        }

        self.speed = self.vel.length();

        self.integrate(
            config.width as f32,
            config.height as f32,
            config.wall_damping,
        );
    }

    /// Move by the current velocity. A move that would push the
    /// radius-inflated footprint past a wall clamps position exactly onto
    /// that wall and reflects the axis velocity scaled by the damping
    /// coefficient; the overshoot itself is discarded.
    fn integrate(&mut self, width: f32, height: f32, damping: f32) {
        let next = self.pos + self.vel;

        let lo = self.radius;
        let hi_x = width - self.radius;
        let hi_y = height - self.radius;

        if next.x < lo {
            self.pos.x = lo;
            self.vel.x *= -damping;
        } else if next.x > hi_x {
            self.pos.x = hi_x;
            self.vel.x *= -damping;
        } else {
            self.pos.x = next.x;
        }

        if next.y < lo {
            self.pos.y = lo;
            self.vel.y *= -damping;
        } else if next.y > hi_y {
            self.pos.y = hi_y;
            self.vel.y *= -damping;
        } else {
            self.pos.y = next.y;
        }
    }
}
