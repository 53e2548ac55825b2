pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod particles;
pub mod phrases;
pub mod poller;
pub mod scene;
pub mod transition;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use config::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use gesture::*;
pub use particles::*;
pub use phrases::*;
pub use poller::*;
pub use scene::*;
pub use transition::*;
