// Game modules: player locomotion and the sandbox that hosts it

pub mod locomotion;
pub mod sandbox;
