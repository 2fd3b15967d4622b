//! Eased pull of every particle toward the target.

use glam::Vec3;

use crate::easing::{ease, lerp_vec3};
use crate::store::ParticleStore;

/// Advance every particle one tick toward `target`.
///
/// `progress += speed`, then the position is lerped toward the target by
/// `ease(progress)`. The lerp starts from the current position, not the
/// spawn point, so the pull compounds from tick to tick.
pub fn tick(store: &mut ParticleStore, target: Vec3) {
    let (positions, progress, speed) = store.columns_mut();
    for ((position, progress), speed) in positions.iter_mut().zip(progress.iter_mut()).zip(speed) {
        *progress += *speed;
        *position = lerp_vec3(*position, target, ease(*progress));
    }
    store.mark_dirty();
}
