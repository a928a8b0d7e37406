use super::resources::FrameStats;
use bevy::prelude::*;

pub fn frame_stats_system(time: Res<Time>, mut stats: ResMut<FrameStats>) {
    if let Some(fps) = stats.record(time.delta_seconds()) {
        debug!("{fps:.1} fps");
    }
}
