pub mod sim;
pub mod wave;
