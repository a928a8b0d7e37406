// ./src/debug/ui.rs
use crate::physics::sim::resources::{
    ResetRequest, ScreenIntensity, SimulationParameters, WaveSimulation,
};
use crate::physics::sim::state::SimulationState;
use crate::physics::sim::time::resources::FrameStats;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{self, Slider, Window},
};

/// Fraction of the peak intensity a local maximum needs to count as a fringe.
const FRINGE_THRESHOLD: f32 = 0.25;

pub fn simulation_control_ui_system(
    mut contexts: EguiContexts,
    mut sim_params: ResMut<SimulationParameters>,
    mut reset_request: ResMut<ResetRequest>,
    sim: Res<WaveSimulation>,
    intensity: Res<ScreenIntensity>,
    stats: Res<FrameStats>,
    mut next_state: ResMut<NextState<SimulationState>>,
    current_state: Res<State<SimulationState>>,
) {
    Window::new("Double Slit")
        .default_width(280.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Source");
            ui.add(
                Slider::new(&mut sim_params.frequency, SimulationParameters::FREQUENCY_RANGE)
                    .step_by(0.005)
                    .text("Frequency (rad/step)"),
            );
            ui.horizontal(|ui| {
                ui.label("Wave");
                let label = if sim_params.wave_enabled { "ON" } else { "OFF" };
                if ui.button(label).clicked() {
                    sim_params.wave_enabled = !sim_params.wave_enabled;
                }
            });
            ui.label(format!(
                "Position: ({:.0}, {:.0}), left click on the field to move",
                sim.source.x, sim.source.y
            ));

            ui.separator();
            ui.heading("Slits");
            ui.add(
                Slider::new(&mut sim_params.slit_gap, SimulationParameters::SLIT_GAP_RANGE)
                    .step_by(2.0)
                    .text("Gap (px)"),
            );
            ui.add(
                Slider::new(&mut sim_params.slit_width, SimulationParameters::SLIT_WIDTH_RANGE)
                    .step_by(1.0)
                    .text("Width (px)"),
            );

            ui.separator();
            ui.heading("Screen");
            ui.add(
                Slider::new(&mut sim_params.screen_position, SimulationParameters::SCREEN_RANGE)
                    .step_by(1.0)
                    .text("Position (%)"),
            );
            ui.label(format!(
                "Fringes: {}",
                intensity.0.fringe_rows(FRINGE_THRESHOLD).len()
            ));

            ui.separator();
            ui.horizontal(|ui| {
                let running = *current_state.get() == SimulationState::Running;
                if ui.button(if running { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    let next = current_state.get().toggled();
                    next_state.set(next);
                    info!("Simulation state -> {:?}", next);
                }
                if ui.button("↺ Reset").clicked() {
                    reset_request.0 = true;
                }
            });

            ui.separator();
            ui.label(format!("FPS: {:.0}", stats.fps()));
            ui.label(format!("Step: {}", sim.grid.time()));
            ui.label(format!("Max |u|: {:.4}", sim.grid.max_abs()));
            ui.label(
                egui::RichText::new("Cyan: positive, red: negative, green: screen")
                    .small()
                    .weak(),
            );
        });
}
