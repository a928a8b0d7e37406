// ./src/main.rs
use bevy::prelude::*;
use bevy_window::WindowResolution;
use bevy_egui::EguiPlugin;

// Crate modules
pub mod config;
pub mod debug;
pub mod math;
pub mod physics;
pub mod setup; // camera, textures, sprites

use config::SimulationConfig;
use debug::{
    ui::simulation_control_ui_system,
    visualization::systems::{
        draw_field_system, draw_intensity_graph_system, sample_intensity_system,
    },
};
use physics::sim::resources::*;
use physics::sim::state::*;
use physics::sim::systems::*;
use physics::sim::time::{resources::FrameStats, systems::frame_stats_system};
use physics::wave::IntensityProfile;
use setup::{GRAPH_WIDTH, setup_scene};

/// Room around field and graph inside the window.
const WINDOW_MARGIN: f32 = 40.0;

fn main() {
    let config_path = SimulationConfig::default_path();
    let loaded = SimulationConfig::load(&config_path);
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let window_size = (
        (config.grid_width + GRAPH_WIDTH) as f32 + 2.0 * WINDOW_MARGIN,
        config.grid_height as f32 + 2.0 * WINDOW_MARGIN,
    );

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Double Slit".to_string(),
            resolution: WindowResolution::new(window_size.0, window_size.1),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(EguiPlugin);

    // Logging is only available once DefaultPlugins are added.
    match &loaded {
        Ok(_) => info!("Configuration from {}: {:?}", config_path.display(), config),
        Err(e) => warn!("{e} ({:?}); using defaults", std::error::Error::source(e)),
    }

    let simulation = match config.build_simulation() {
        Ok(simulation) => simulation,
        Err(e) => {
            error!("Cannot start simulation: {e}");
            return;
        }
    };

    app.insert_resource(config.parameters.clone())
        .insert_resource(ScreenIntensity(IntensityProfile::new(config.grid_height)))
        .insert_resource(simulation)
        .init_resource::<ResetRequest>()
        .init_resource::<FrameStats>()
        .init_state::<SimulationState>()
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            // Moves from Initializing to Running once the Startup systems have run.
            (|mut next_state: ResMut<NextState<SimulationState>>| {
                next_state.set(SimulationState::Running);
                info!("Initialization complete, simulation is Running.");
            })
            .run_if(in_state(SimulationState::Initializing)),
        )
        .add_systems(
            Update,
            (
                // Block 1: UI and input
                simulation_control_ui_system,
                place_source_on_click_system,
                // Block 2: apply configuration between batches
                sync_slits_system,
                handle_reset_request_system,
                // Block 3: simulation sub-steps
                advance_wave_system.run_if(in_state(SimulationState::Running)),
                stability_check_system,
                // Block 4: rendering
                draw_field_system,
                sample_intensity_system.run_if(in_state(SimulationState::Running)),
                draw_intensity_graph_system,
                frame_stats_system,
            )
                .chain(),
        )
        .run();
}
