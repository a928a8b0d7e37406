use super::frame::FrameRenderer;
use super::intensity_graph::IntensityGraph;
use crate::physics::sim::resources::{ScreenIntensity, SimulationParameters, WaveSimulation};
use bevy::prelude::*;

/// Field renderer and the texture shown by the field sprite.
#[derive(Resource, Debug)]
pub struct FieldView {
    pub renderer: FrameRenderer,
    pub image: Handle<Image>,
}

/// Intensity bar chart and the texture shown next to the field.
#[derive(Resource, Debug)]
pub struct IntensityView {
    pub graph: IntensityGraph,
    pub image: Handle<Image>,
}

/// Copies an RGBA buffer into the image asset if the sizes agree.
fn upload(images: &mut Assets<Image>, handle: &Handle<Image>, pixels: &[u8]) {
    let Some(image) = images.get_mut(handle) else {
        return;
    };
    if image.data.len() == pixels.len() {
        image.data.copy_from_slice(pixels);
    } else {
        debug!(
            "Texture size {} does not match frame size {}",
            image.data.len(),
            pixels.len()
        );
    }
}

pub fn draw_field_system(
    sim: Res<WaveSimulation>,
    params: Res<SimulationParameters>,
    mut view: ResMut<FieldView>,
    mut images: ResMut<Assets<Image>>,
) {
    let view = &mut *view;
    if !view
        .renderer
        .draw(&sim.grid, Some(sim.source), Some(params.screen_position))
    {
        debug!(
            "Renderer is {}x{}, grid is {}x{}; frame skipped",
            view.renderer.width(),
            view.renderer.height(),
            sim.grid.width(),
            sim.grid.height()
        );
        return;
    }
    upload(&mut images, &view.image, view.renderer.pixels());
}

/// Folds the freshly drawn frame into the screen average. Only runs while
/// the simulation advances.
pub fn sample_intensity_system(
    sim: Res<WaveSimulation>,
    params: Res<SimulationParameters>,
    mut intensity: ResMut<ScreenIntensity>,
) {
    intensity.0.sample(&sim.grid, params.screen_position);
}

pub fn draw_intensity_graph_system(
    intensity: Res<ScreenIntensity>,
    mut view: ResMut<IntensityView>,
    mut images: ResMut<Assets<Image>>,
) {
    let view = &mut *view;
    view.graph.draw(&intensity.0);
    upload(&mut images, &view.image, view.graph.pixels());
}
