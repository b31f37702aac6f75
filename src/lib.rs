// Platformer locomotion: input, physics and the player controller

pub mod engine;
pub mod game;
