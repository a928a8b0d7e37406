// ./src/setup.rs
use crate::debug::visualization::{
    frame::FrameRenderer,
    intensity_graph::IntensityGraph,
    systems::{FieldView, IntensityView},
};
use crate::physics::sim::resources::WaveSimulation;
use bevy::prelude::*;
use bevy_render::{
    render_asset::RenderAssetUsages,
    render_resource::{Extent3d, TextureDimension, TextureFormat},
    texture::ImageSampler,
};

/// Width of the intensity graph next to the field, in pixels.
pub const GRAPH_WIDTH: usize = 150;
/// Horizontal space between field and graph.
const GRAPH_GAP: f32 = 10.0;

/// Marks the sprite showing the field; clicks are mapped through its transform.
#[derive(Component, Debug)]
pub struct FieldSprite;

fn canvas_image(width: usize, height: usize) -> Image {
    let mut image = Image::new_fill(
        Extent3d {
            width: width as u32,
            height: height as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.sampler = ImageSampler::nearest();
    image
}

pub fn setup_scene(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    sim: Res<WaveSimulation>,
) {
    let (width, height) = (sim.grid.width(), sim.grid.height());

    // Camera
    commands.spawn(Camera2dBundle::default());

    // Field, left of centre
    let field_image = images.add(canvas_image(width, height));
    let field_x = -(GRAPH_WIDTH as f32 + GRAPH_GAP) / 2.0;
    commands.spawn((
        SpriteBundle {
            texture: field_image.clone(),
            sprite: Sprite {
                custom_size: Some(Vec2::new(width as f32, height as f32)),
                ..default()
            },
            transform: Transform::from_xyz(field_x, 0.0, 0.0),
            ..default()
        },
        FieldSprite,
    ));

    // Intensity graph to its right
    let graph_image = images.add(canvas_image(GRAPH_WIDTH, height));
    let graph_x = field_x + (width + GRAPH_WIDTH) as f32 / 2.0 + GRAPH_GAP;
    commands.spawn(SpriteBundle {
        texture: graph_image.clone(),
        sprite: Sprite {
            custom_size: Some(Vec2::new(GRAPH_WIDTH as f32, height as f32)),
            ..default()
        },
        transform: Transform::from_xyz(graph_x, 0.0, 0.0),
        ..default()
    });

    commands.insert_resource(FieldView {
        renderer: FrameRenderer::new(width, height),
        image: field_image,
    });
    commands.insert_resource(IntensityView {
        graph: IntensityGraph::new(GRAPH_WIDTH, height),
        image: graph_image,
    });
    info!("Scene ready: field {}x{}, graph {}x{}", width, height, GRAPH_WIDTH, height);
}
