//! # swarm
//!
//! A particle swarm that chases the pointer.
//!
//! Every particle eases toward a target point on the `z = 0` plane under the
//! pointer. Particles the pointer ray passes through are scattered back into
//! a random cube, and a perspective camera drifts after the target.
//!
//! ## Quick Start
//!
//! ```ignore
//! use swarm::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Swarm::new()
//!         .with_particle_count(25_000)
//!         .with_spread(100.0)
//!         .with_speed(0.005)
//!         .run()
//! }
//! ```
//!
//! ## Headless use
//!
//! The simulation does not need a window. Build the state and drive it
//! one frame at a time:
//!
//! ```ignore
//! let mut state = Swarm::new().with_seed(7).build()?;
//! state.set_target(Vec3::new(5.0, 0.0, 0.0));
//! for _ in 0..100 {
//!     state.tick(&FrameInput::default());
//! }
//! ```
//!
//! Drawing goes through [`RenderTarget`]; [`Presenter`] decides what has to
//! be re-uploaded each frame.
//!
//! ## Controls
//!
//! | keys  | parameter |
//! |-------|-----------|
//! | Q / A | spread    |
//! | W / S | size      |
//! | E / D | count     |
//! | R / F | speed     |

pub mod animation;
pub mod camera;
pub mod config;
pub mod easing;
pub mod error;
mod gpu;
pub mod input;
pub mod picking;
pub mod render;
pub mod respawn;
mod simulation;
pub mod store;
pub mod time;
pub mod tracker;
mod window;

pub use camera::{AxisMode, FollowCamera};
pub use config::{CameraConfig, PickConfig, Settings, SwarmConfig};
pub use error::{ConfigError, GpuError, RenderError, RunError};
pub use glam::{Vec2, Vec3};
pub use picking::{Hit, HitKind, Marker, Ray};
pub use render::{Presenter, RenderTarget};
pub use simulation::{step, FrameInput, Swarm, SwarmState, TickReport};
pub use store::ParticleStore;
pub use tracker::TargetTracker;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use swarm::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Settings, SwarmConfig};
    pub use crate::error::RunError;
    pub use crate::render::{Presenter, RenderTarget};
    pub use crate::simulation::{step, FrameInput, Swarm, SwarmState};
    pub use crate::{Vec2, Vec3};
}
