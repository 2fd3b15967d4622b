//! Scatter particles that the picking ray passes through.

use rand::Rng;

use crate::picking::{intersect, Marker, Ray};
use crate::store::ParticleStore;

/// Cast `ray` through the swarm and the marker, and respawn every particle it hits.
///
/// Hit particles get a fresh random position in the spread cube and zero
/// progress; their speed is kept. Marker hits are ignored. Returns how many
/// particles were respawned.
pub fn respawn_on_intersect<R: Rng + ?Sized>(
    ray: &Ray,
    store: &mut ParticleStore,
    marker: &Marker,
    point_threshold: f32,
    spread: f32,
    rng: &mut R,
) -> usize {
    let hits = intersect(ray, store.as_flat(), Some(marker), point_threshold);

    let mut respawned = 0;
    for index in hits.iter().filter_map(|hit| hit.particle_index()) {
        store.respawn(index, spread, rng);
        respawned += 1;
    }

    if respawned > 0 {
        tracing::trace!(target: "swarm::respawn", respawned, hits = hits.len(), "respawned particles");
    }
    respawned
}
