//! Particle storage.
//!
//! Positions live in one contiguous `Vec<Vec3>` so the same memory can be
//! handed to the renderer and to the ray query as a flat `[f32]` buffer of
//! length `3 * count`. Progress and speed sit in parallel arrays indexed by
//! the same particle index.

use glam::Vec3;
use rand::Rng;

/// Per-particle state for the whole swarm.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    progress: Vec<f32>,
    speed: Vec<f32>,
    dirty: bool,
    generation: u64,
}

impl ParticleStore {
    /// Allocate `count` particles.
    ///
    /// Each position component is uniform in `[-spread/2, spread/2]`, each
    /// speed uniform in `(0, max_speed]`, and every progress starts at zero.
    ///
    /// # Panics
    ///
    /// If `max_speed` is not a positive finite number.
    pub fn new<R: Rng + ?Sized>(count: usize, spread: f32, max_speed: f32, rng: &mut R) -> Self {
        assert!(
            max_speed.is_finite() && max_speed > 0.0,
            "particle speed must be positive, got {max_speed}"
        );

        let positions = (0..count).map(|_| random_position(spread, rng)).collect();
        let colors = (0..count)
            .map(|_| Vec3::new(rng.gen(), rng.gen(), rng.gen()))
            .collect();
        // gen_range is half-open, flip it so zero is excluded and max included.
        let speed = (0..count)
            .map(|_| max_speed - rng.gen_range(0.0..max_speed))
            .collect();

        tracing::debug!(target: "swarm::store", count, spread, max_speed, "allocated particle store");

        Self {
            positions,
            colors,
            progress: vec![0.0; count],
            speed,
            dirty: true,
            generation: 0,
        }
    }

    /// Throw away every particle and allocate a fresh store in place.
    ///
    /// Bumps [`generation`](Self::generation) so renderer-side buffers know
    /// to retarget.
    pub fn resize<R: Rng + ?Sized>(&mut self, count: usize, spread: f32, max_speed: f32, rng: &mut R) {
        let generation = self.generation + 1;
        *self = Self::new(count, spread, max_speed, rng);
        self.generation = generation;
        tracing::info!(target: "swarm::store", count, generation, "rebuilt particle store");
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of particle `index`.
    #[inline]
    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    /// Overwrite one position and mark the buffer dirty.
    #[inline]
    pub fn set_position(&mut self, index: usize, position: Vec3) {
        self.positions[index] = position;
        self.dirty = true;
    }

    /// Animation progress of particle `index`. Zero after spawn or respawn.
    #[inline]
    pub fn progress(&self, index: usize) -> f32 {
        self.progress[index]
    }

    /// Per-tick progress increment of particle `index`.
    #[inline]
    pub fn speed(&self, index: usize) -> f32 {
        self.speed[index]
    }

    /// Put a particle back to a random spot in the spread cube with zero progress.
    ///
    /// Speed is kept.
    pub fn respawn<R: Rng + ?Sized>(&mut self, index: usize, spread: f32, rng: &mut R) {
        self.positions[index] = random_position(spread, rng);
        self.progress[index] = 0.0;
        self.dirty = true;
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` buffer.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Mutable views of positions, progress and speed for a full-swarm pass.
    ///
    /// The caller is responsible for calling [`mark_dirty`](Self::mark_dirty).
    pub(crate) fn columns_mut(&mut self) -> (&mut [Vec3], &mut [f32], &[f32]) {
        (
            self.positions.as_mut_slice(),
            self.progress.as_mut_slice(),
            self.speed.as_slice(),
        )
    }

    /// Flag the position buffer for upload.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether positions changed since the last [`take_dirty`](Self::take_dirty).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the dirty flag. Returns whether the buffer changed since the last call.
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Incremented every time the store is rebuilt.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn random_position<R: Rng + ?Sized>(spread: f32, rng: &mut R) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * spread,
        (rng.gen::<f32>() - 0.5) * spread,
        (rng.gen::<f32>() - 0.5) * spread,
    )
}
