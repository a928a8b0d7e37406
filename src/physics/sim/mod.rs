pub mod resources;
pub mod state;
pub mod systems;
pub mod time;
