// Host-side tests for round-robin slot allocation.

use countdown_core::*;
use rand::prelude::*;

#[test]
fn start_indices_are_cumulative_sum_mod_capacity() {
    let capacity = 3000;
    let mut pool = ParticlePool::new(capacity).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let mut total = 0usize;
    for _ in 0..1_000 {
        let count = rng.gen_range(0..5_000);
        let range = pool.allocate(count);
        assert_eq!(range.start(), total % capacity);
        assert!(range.len() <= capacity);
        assert!(range.indices().all(|i| i < capacity));
        total += count;
    }
}

#[test]
fn wrapped_range_has_distinct_indices() {
    let mut pool = ParticlePool::new(7).unwrap();
    pool.allocate(5);
    let r = pool.allocate(7);
    let mut seen = r.indices().collect::<Vec<_>>();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 7);
}

#[test]
fn vertices_cast_to_bytes_for_upload() {
    let pool = ParticlePool::new(16).unwrap();
    let bytes: &[u8] = bytemuck::cast_slice(pool.vertices());
    assert_eq!(bytes.len(), 16 * std::mem::size_of::<ParticleVertex>());
    assert_eq!(std::mem::size_of::<ParticleVertex>(), 32);
}
