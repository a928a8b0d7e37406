use super::resources::{ResetRequest, ScreenIntensity, SimulationParameters, WaveSimulation};
use crate::physics::wave::{SANITY_BOUND, SourcePosition};
use crate::setup::FieldSprite;
use bevy::prelude::*;
use bevy_window::PrimaryWindow;
use bevy_egui::EguiContexts;

/// Rewrites the barrier whenever the panel changed gap or width.
/// Runs before the sub-steps so geometry never changes inside a batch.
pub fn sync_slits_system(params: Res<SimulationParameters>, mut sim: ResMut<WaveSimulation>) {
    if sim.sync_slits(&params) {
        info!(
            "Slits updated: gap {:.0}, width {:.0}, barrier column {:.0}",
            params.slit_gap,
            params.slit_width,
            sim.wall_column()
        );
    }
}

pub fn handle_reset_request_system(
    mut request: ResMut<ResetRequest>,
    mut sim: ResMut<WaveSimulation>,
    mut intensity: ResMut<ScreenIntensity>,
) {
    if !request.0 {
        return;
    }
    request.0 = false;
    info!("Resetting field after {} steps.", sim.grid.time());
    sim.grid.reset();
    intensity.0.reset();
}

/// One tick: `steps_per_frame` sub-steps sharing a single parameter snapshot.
pub fn advance_wave_system(params: Res<SimulationParameters>, mut sim: ResMut<WaveSimulation>) {
    let tick = params.snapshot(sim.source, sim.amplitude);
    sim.advance(&tick);
}

/// Warns once when the field leaves the sane range, and once more when it returns.
pub fn stability_check_system(sim: Res<WaveSimulation>, mut unstable: Local<bool>) {
    let blown = sim.grid.exceeds(SANITY_BOUND);
    if blown && !*unstable {
        warn!(
            "Field exceeded {SANITY_BOUND} at step {} (max |u| = {:.3e}).",
            sim.grid.time(),
            sim.grid.max_abs()
        );
    } else if !blown && *unstable {
        info!("Field back within {SANITY_BOUND} at step {}.", sim.grid.time());
    }
    *unstable = blown;
}

/// Maps a point in the field sprite's local space (origin at the centre,
/// y up) to grid coordinates (origin top left, y down).
pub fn sprite_local_to_grid(local: Vec2, width: usize, height: usize) -> Vec2 {
    Vec2::new(
        local.x + width as f32 / 2.0,
        height as f32 / 2.0 - local.y,
    )
}

/// Left click on the field moves the source.
pub fn place_source_on_click_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    sprites: Query<&GlobalTransform, With<FieldSprite>>,
    mut contexts: EguiContexts,
    mut sim: ResMut<WaveSimulation>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Ok(sprite_transform) = sprites.get_single() else {
        return;
    };
    let Some(world) = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor))
    else {
        return;
    };

    let local = sprite_transform
        .affine()
        .inverse()
        .transform_point3(world.extend(0.0))
        .truncate();
    let (width, height) = (sim.grid.width(), sim.grid.height());
    let cell = sprite_local_to_grid(local, width, height);

    match SourcePosition::from_pointer(cell.x, cell.y, width, height) {
        Some(pos) => {
            sim.place_source(pos.x, pos.y);
            debug!("Source moved to ({:.1}, {:.1})", sim.source.x, sim.source.y);
        }
        None => debug!("Click at ({:.1}, {:.1}) outside the field", cell.x, cell.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::wave::{FieldGrid, IntensityProfile};

    fn world(width: usize, height: usize) -> World {
        let mut world = World::new();
        let grid = FieldGrid::new(width, height).unwrap();
        world.insert_resource(WaveSimulation::new(grid, 2.0, 3, 50.0));
        world.insert_resource(ScreenIntensity(IntensityProfile::new(height)));
        world.insert_resource(SimulationParameters::default());
        world.init_resource::<ResetRequest>();
        world
    }

    #[test]
    fn test_sprite_local_to_grid() {
        assert_eq!(
            sprite_local_to_grid(Vec2::ZERO, 600, 450),
            Vec2::new(300.0, 225.0)
        );
        assert_eq!(
            sprite_local_to_grid(Vec2::new(-300.0, 225.0), 600, 450),
            Vec2::new(0.0, 0.0)
        );
        assert_eq!(
            sprite_local_to_grid(Vec2::new(100.0, -25.0), 600, 450),
            Vec2::new(400.0, 250.0)
        );
    }

    #[test]
    fn test_tick_systems_advance_and_reset() {
        let mut world = world(60, 40);
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                sync_slits_system,
                handle_reset_request_system,
                advance_wave_system,
                stability_check_system,
            )
                .chain(),
        );

        schedule.run(&mut world);
        {
            let sim = world.resource::<WaveSimulation>();
            assert_eq!(sim.grid.time(), 3);
            assert!(sim.applied_slits.is_some());
            assert!(sim.grid.is_wall(30, 20));
        }

        schedule.run(&mut world);
        assert_eq!(world.resource::<WaveSimulation>().grid.time(), 6);

        world.resource_mut::<ResetRequest>().0 = true;
        schedule.run(&mut world);
        // Reset clears the counter, then the same tick runs its sub-steps.
        assert_eq!(world.resource::<WaveSimulation>().grid.time(), 3);
        assert!(!world.resource::<ResetRequest>().0);
    }
}
