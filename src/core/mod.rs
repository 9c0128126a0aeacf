pub mod config;
pub mod ecs;
pub mod serialization;
pub mod world;
