pub mod frame;
pub mod intensity_graph;
pub mod systems;
