// Engine modules: input, physics, frame timing

pub mod frame_clock;
pub mod input;
pub mod physics;
