pub mod agent;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod sim;
pub mod trail;

pub use agent::Agent;
pub use color::{ColorSpec, Hsv};
pub use config::Config;
pub use error::Error;
pub use geometry::Circle;
pub use render::{Renderer, Viewport};
pub use sim::{FrameSnapshot, Simulation};
pub use trail::{Particle, Trail};
