//! Swarm state, the per-frame step and the builder.
//!
//! One frame is a strictly ordered pass over the state:
//!
//! 1. pending input (viewport, reconfiguration, pointer → target)
//! 2. eased pull of every particle toward the target
//! 3. respawn of particles on the picking ray
//! 4. camera follow
//!
//! Drawing is left to a [`RenderTarget`](crate::render::RenderTarget).

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::animation;
use crate::camera::{AxisMode, FollowCamera};
use crate::config::{Settings, SwarmConfig};
use crate::error::{ConfigError, RunError};
use crate::picking::Ray;
use crate::respawn::respawn_on_intersect;
use crate::store::ParticleStore;
use crate::tracker::TargetTracker;

/// Everything that happened outside the simulation since the previous frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Latest pointer position in NDC, if it moved.
    pub pointer: Option<Vec2>,
    /// New viewport size in pixels, if it changed.
    pub viewport: Option<(u32, u32)>,
    /// Replacement swarm parameters, if any were edited.
    pub reconfigure: Option<SwarmConfig>,
}

/// Summary of one [`SwarmState::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Particles scattered by the picking ray.
    pub respawned: usize,
    /// Whether the particle store was rebuilt this frame.
    pub rebuilt: bool,
    /// What each camera axis (x, y) did.
    pub camera: [AxisMode; 2],
}

/// The whole simulation: particles, target, camera and settings.
#[derive(Debug, Clone)]
pub struct SwarmState {
    settings: Settings,
    store: ParticleStore,
    tracker: TargetTracker,
    camera: FollowCamera,
    rng: SmallRng,
}

impl SwarmState {
    /// Create a state seeded from OS entropy.
    pub fn new(settings: Settings) -> Self {
        Self::from_rng(settings, SmallRng::from_entropy())
    }

    /// Create a reproducible state.
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::from_rng(settings, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(mut settings: Settings, mut rng: SmallRng) -> Self {
        // Edits are clamped to the control ranges; the starting config is too.
        let swarm = settings.swarm.clamped();
        if swarm != settings.swarm {
            tracing::warn!(
                target: "swarm::simulation",
                requested = ?settings.swarm,
                clamped = ?swarm,
                "swarm config clamped to control ranges"
            );
            settings.swarm = swarm;
        }
        let store = ParticleStore::new(swarm.count as usize, swarm.spread, swarm.speed, &mut rng);
        Self {
            store,
            tracker: TargetTracker::new(settings.picking.marker_radius),
            camera: FollowCamera::new(&settings.camera, 1.0),
            settings,
            rng,
        }
    }

    /// Run one frame.
    pub fn tick(&mut self, input: &FrameInput) -> TickReport {
        if let Some((width, height)) = input.viewport {
            self.camera.set_viewport(width, height);
            tracing::debug!(target: "swarm::simulation", width, height, "viewport resized");
        }

        let rebuilt = match input.reconfigure {
            Some(config) => self.reconfigure(config),
            None => false,
        };

        if let Some(pointer) = input.pointer {
            self.tracker.update(pointer, &self.camera);
        }
        let target = self.tracker.target();

        animation::tick(&mut self.store, target);

        let ray = Ray::from_camera(self.tracker.pointer(), &self.camera);
        let respawned = respawn_on_intersect(
            &ray,
            &mut self.store,
            self.tracker.marker(),
            self.settings.picking.point_threshold,
            self.settings.swarm.spread,
            &mut self.rng,
        );

        let camera = self.camera.follow(target);
        if camera.contains(&AxisMode::Wrap) {
            tracing::debug!(target: "swarm::simulation", position = ?self.camera.position, "camera wrapped");
        }

        TickReport {
            respawned,
            rebuilt,
            camera,
        }
    }

    /// Replace the swarm parameters.
    ///
    /// The config is clamped to the control ranges first. Changing `count`
    /// or `speed` rebuilds the store from scratch; `spread` and `size` just
    /// take effect from now on. Returns whether a rebuild happened.
    pub fn reconfigure(&mut self, config: SwarmConfig) -> bool {
        let next = config.clamped();
        if let Err(err) = next.validate() {
            tracing::warn!(target: "swarm::simulation", %err, "ignoring invalid swarm config");
            return false;
        }

        let rebuild = self.settings.swarm.needs_rebuild(&next);
        self.settings.swarm = next;
        if rebuild {
            self.store
                .resize(next.count as usize, next.spread, next.speed, &mut self.rng);
        }
        rebuild
    }

    /// Pin the target, bypassing the pointer.
    pub fn set_target(&mut self, target: Vec3) {
        self.tracker.set_target(target);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.settings.swarm
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ParticleStore {
        &mut self.store
    }

    pub fn tracker(&self) -> &TargetTracker {
        &self.tracker
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FollowCamera {
        &mut self.camera
    }
}

/// Pure-function form of [`SwarmState::tick`]: `(state, input) -> state`.
pub fn step(mut state: SwarmState, input: &FrameInput) -> SwarmState {
    state.tick(input);
    state
}

/// A swarm builder.
///
/// Use method chaining to configure, then call `.run()` to open a window,
/// or `.build()` to drive the state yourself.
///
/// ```ignore
/// Swarm::new()
///     .with_particle_count(50_000)
///     .with_speed(0.01)
///     .run()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Swarm {
    settings: Settings,
    seed: Option<u64>,
}

impl Swarm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all settings at once.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_config(mut self, config: SwarmConfig) -> Self {
        self.settings.swarm = config;
        self
    }

    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.settings.swarm.count = count;
        self
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.settings.swarm.spread = spread;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.settings.swarm.speed = speed;
        self
    }

    pub fn with_particle_size(mut self, size: f32) -> Self {
        self.settings.swarm.size = size;
        self
    }

    /// Make particle placement and respawns reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the settings and create the initial state.
    pub fn build(self) -> Result<SwarmState, ConfigError> {
        self.settings.validate()?;
        Ok(match self.seed {
            Some(seed) => SwarmState::with_seed(self.settings, seed),
            None => SwarmState::new(self.settings),
        })
    }

    /// Open a window and run until it is closed.
    pub fn run(self) -> Result<(), RunError> {
        let state = self.build()?;
        tracing::info!(
            target: "swarm::simulation",
            count = state.config().count,
            spread = state.config().spread,
            speed = state.config().speed,
            "starting swarm"
        );
        crate::window::run(state)
    }
}
