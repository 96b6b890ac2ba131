//! Interactive 2D particle fluid approximation.
//!
//! Particles splat a smoothing kernel into a grid-resolution density field
//! each tick; a flow field derived from the density gradient pushes them
//! toward emptier cells. Grid-based kernel smoothing, not pairwise SPH.

pub mod analysis;
pub mod app;
pub mod config;
pub mod density;
pub mod export;
pub mod flow;
pub mod kernel;
pub mod particle;
pub mod render;
pub mod sim;

pub use analysis::{AnalysisRecorder, SimMetrics};
pub use app::InteractiveApp;
pub use config::{ConfigError, SimConfig};
pub use density::DensityField;
pub use export::ImageExporter;
pub use flow::FlowField;
pub use kernel::{PointerKernel, SmoothingKernel};
pub use particle::Particle;
pub use render::Renderer;
pub use sim::{FeatureToggles, PointerState, Simulation, TickInput};
