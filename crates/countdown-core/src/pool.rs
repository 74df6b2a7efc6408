//! Fixed-capacity particle storage shared by every firework.
//!
//! Slots are handed out round-robin from a cursor that only moves forward and
//! wraps modulo the capacity. Nothing is ever freed: a new allocation simply
//! takes over whatever occupied those slots before, even if the previous
//! owner is still fading out. That tearing is the price of bounded memory.

use crate::constants::RETIRED_POSITION;
use crate::emitter::EffectId;
use crate::error::ConfigError;
use glam::Vec3;

/// GPU instance layout for one drawn point.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl ParticleVertex {
    pub const RETIRED: ParticleVertex = ParticleVertex {
        position: RETIRED_POSITION,
        size: 0.0,
        color: [0.0; 4],
    };

    pub fn new(position: Vec3, size: f32, rgb: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            size,
            color: [rgb[0], rgb[1], rgb[2], 1.0],
        }
    }
}

/// A run of `len` slots starting at `start`, wrapping at `capacity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotRange {
    start: usize,
    len: usize,
    capacity: usize,
}

impl SlotRange {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let (start, capacity) = (self.start, self.capacity);
        (0..self.len).map(move |k| (start + k) % capacity)
    }
}

pub struct ParticlePool {
    vertices: Vec<ParticleVertex>,
    velocities: Vec<Vec3>,
    owners: Vec<Option<EffectId>>,
    cursor: usize,
    dirty: bool,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            vertices: vec![ParticleVertex::RETIRED; capacity],
            velocities: vec![Vec3::ZERO; capacity],
            owners: vec![None; capacity],
            cursor: 0,
            dirty: true,
        })
    }

    pub fn capacity(&self) -> usize {
        self.vertices.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reserve `count` slots starting at the cursor, then advance it.
    ///
    /// Never fails. The returned span is clamped to the capacity while the
    /// cursor still advances by the full `count`, so successive start indices
    /// always equal the running total modulo the capacity.
    pub fn allocate(&mut self, count: usize) -> SlotRange {
        let capacity = self.capacity();
        let range = SlotRange {
            start: self.cursor,
            len: count.min(capacity),
            capacity,
        };
        self.cursor = (self.cursor + count % capacity) % capacity;
        range
    }

    pub fn claim(&mut self, range: SlotRange, owner: EffectId) {
        for i in range.indices() {
            self.owners[i] = Some(owner);
        }
    }

    pub fn owner(&self, index: usize) -> Option<EffectId> {
        self.owners[index]
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_array(self.vertices[index].position)
    }

    pub fn velocity(&self, index: usize) -> Vec3 {
        self.velocities[index]
    }

    pub fn write(&mut self, index: usize, position: Vec3, velocity: Vec3, color: [f32; 3], size: f32) {
        self.vertices[index] = ParticleVertex::new(position, size, color);
        self.velocities[index] = velocity;
        self.dirty = true;
    }

    /// Park a range far outside the visible volume with zero size.
    pub fn retire(&mut self, range: SlotRange) {
        for i in range.indices() {
            self.retire_slot(i);
        }
    }

    /// Like [`retire`](Self::retire) but skips slots another effect has since taken.
    pub fn retire_owned(&mut self, range: SlotRange, owner: EffectId) {
        for i in range.indices() {
            if self.owners[i] == Some(owner) {
                self.retire_slot(i);
            }
        }
    }

    fn retire_slot(&mut self, index: usize) {
        self.vertices[index] = ParticleVertex::RETIRED;
        self.velocities[index] = Vec3::ZERO;
        self.owners[index] = None;
        self.dirty = true;
    }

    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag (the renderer calls this once per upload).
    /// Any `write` or retirement since the last call sets it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(ParticlePool::new(0), Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn ranges_wrap_around_the_end() {
        let mut pool = ParticlePool::new(10).unwrap();
        pool.allocate(8);
        let r = pool.allocate(5);
        assert_eq!(r.start(), 8);
        assert_eq!(r.indices().collect::<Vec<_>>(), vec![8, 9, 0, 1, 2]);
        assert_eq!(pool.cursor(), 3);
    }

    #[test]
    fn oversized_request_is_clamped_but_cursor_tracks_total() {
        let mut pool = ParticlePool::new(10).unwrap();
        pool.allocate(3);
        let r = pool.allocate(25);
        assert_eq!(r.len(), 10);
        assert_eq!(r.start(), 3);
        assert_eq!(pool.cursor(), (3 + 25) % 10);
    }

    #[test]
    fn retire_owned_leaves_other_owners_alone() {
        let mut pool = ParticlePool::new(4).unwrap();
        let old = pool.allocate(4);
        pool.claim(old, EffectId(1));
        for i in old.indices() {
            pool.write(i, Vec3::ONE, Vec3::X, [1.0, 1.0, 1.0], 0.1);
        }
        // second effect takes over slots 0 and 1
        let newer = pool.allocate(2);
        pool.claim(newer, EffectId(2));

        pool.retire_owned(old, EffectId(1));
        assert_eq!(pool.owner(0), Some(EffectId(2)));
        assert_eq!(pool.vertices()[0].size, 0.1);
        assert_eq!(pool.owner(2), None);
        assert_eq!(pool.vertices()[2], ParticleVertex::RETIRED);
    }

    #[test]
    fn retire_moves_out_of_view() {
        let mut pool = ParticlePool::new(3).unwrap();
        let r = pool.allocate(3);
        for i in r.indices() {
            pool.write(i, Vec3::ZERO, Vec3::Y, [1.0, 0.0, 0.0], 0.2);
        }
        pool.retire(r);
        for v in pool.vertices() {
            assert_eq!(v.position, RETIRED_POSITION);
            assert_eq!(v.size, 0.0);
        }
    }

    #[test]
    fn take_dirty_clears_flag() {
        let mut pool = ParticlePool::new(1).unwrap();
        assert!(pool.take_dirty());
        assert!(!pool.is_dirty());
        pool.mark_dirty();
        assert!(pool.take_dirty());
    }

    #[test]
    fn writes_and_retirements_set_dirty() {
        let mut pool = ParticlePool::new(2).unwrap();
        pool.take_dirty();
        let r = pool.allocate(2);
        pool.claim(r, EffectId(1));
        assert!(!pool.is_dirty(), "allocate and claim do not touch vertices");

        pool.write(0, Vec3::ZERO, Vec3::Y, [1.0, 1.0, 1.0], 0.1);
        assert!(pool.take_dirty());

        pool.retire_owned(r, EffectId(9));
        assert!(!pool.is_dirty(), "nothing owned by 9");
        pool.retire_owned(r, EffectId(1));
        assert!(pool.take_dirty());
    }
}
