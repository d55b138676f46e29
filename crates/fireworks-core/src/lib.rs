pub mod buffers;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod explosion;
pub mod firework;
pub mod launcher;
pub mod particle;
pub mod physics;
pub mod random;
pub mod scheduler;
pub mod simulation;
pub mod trail;
pub mod view;

#[cfg(feature = "gpu")]
pub mod gpu;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

pub use buffers::*;
pub use color::*;
pub use config::*;
pub use error::*;
pub use explosion::*;
pub use firework::*;
pub use launcher::*;
pub use particle::*;
pub use physics::*;
pub use random::*;
pub use scheduler::*;
pub use simulation::*;
pub use trail::*;
pub use view::*;
