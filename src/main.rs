use std::path::Path;

use puddle::{
    AnalysisRecorder, FeatureToggles, ImageExporter, SimConfig, SimMetrics, Simulation, TickInput,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "test" {
        let config = if args.len() > 2 {
            SimConfig::load_json(Path::new(&args[2]))?
        } else {
            SimConfig {
                width: 200,
                height: 200,
                particle_count: 80,
                density_radius: 12,
                sample_radius: 6,
                pointer_radius: 30,
                ..SimConfig::default()
            }
        };
        run_headless_test(config)?;
    } else {
        run_gui_app();
    }

    Ok(())
}

fn run_headless_test(config: SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Running headless particle fluid test with quantitative analysis...");

    let mut simulation = Simulation::new(config)?;
    let exporter = ImageExporter::new(800, 800);
    let mut recorder = AnalysisRecorder::new();

    let input = TickInput {
        toggles: FeatureToggles {
            gravity: true,
            jitter: false,
            deceleration: true,
            show_field: false,
            spawn: false,
        },
        ..TickInput::default()
    };

    recorder.record_frame(&simulation, 0);
    SimMetrics::analyze(&simulation, 0).print_summary();

    for frame in 1..=100 {
        simulation.tick(&input);
        recorder.record_frame(&simulation, frame);

        if frame % 20 == 0 {
            SimMetrics::analyze(&simulation, frame).print_summary();

            let density_path = format!("test_density_{:04}.png", frame);
            let flow_path = format!("test_flow_{:04}.png", frame);
            let particles_path = format!("test_particles_{:04}.png", frame);
            exporter.export_density_png(&simulation, Path::new(&density_path))?;
            exporter.export_flow_png(&simulation, Path::new(&flow_path))?;
            exporter.export_particles_png(&simulation, Path::new(&particles_path))?;
            log::info!("exported frame {frame}");
        }
    }

    recorder.print_trends();

    println!("Test completed! Ran 100 ticks with frame exports every 20.");
    Ok(())
}

fn run_gui_app() {
    let config = SimConfig::default();
    let simulation = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 860.0])
            .with_title("puddle - Interactive Particle Fluid"),
        ..Default::default()
    };

    eframe::run_native(
        "puddle",
        options,
        Box::new(|_cc| Box::new(puddle::InteractiveApp::new(simulation))),
    )
    .unwrap();
}
