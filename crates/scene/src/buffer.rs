use std::ops::Range;

use crate::error::SceneError;
use crate::primitive::Primitive;
use crate::slot::{SLOT_SIZE, slot_range};

/// Bytes in the header region: one `u32` count padded to 16.
pub const HEADER_SIZE: usize = 16;

/// Largest slot count a buffer may be created with (8 MiB of slots).
pub const MAX_SCENE_SLOTS: usize = 1 << 16;

/// CPU-side copy of the primitive array, `capacity * SLOT_SIZE` bytes.
///
/// Tracks the byte range written since the last [`PrimitiveBuffer::take_dirty`]
/// so the render backend uploads only what changed.
#[derive(Debug, Clone)]
pub struct PrimitiveBuffer {
    bytes: Vec<u8>,
    dirty: Option<Range<usize>>,
}

impl PrimitiveBuffer {
    /// Allocate `capacity` zeroed slots.
    ///
    /// Fails with [`SceneError::InvalidCapacity`] unless
    /// `1 <= capacity <= MAX_SCENE_SLOTS`.
    pub fn new(capacity: usize) -> Result<Self, SceneError> {
        let len = capacity
            .checked_mul(SLOT_SIZE)
            .filter(|_| (1..=MAX_SCENE_SLOTS).contains(&capacity))
            .ok_or(SceneError::InvalidCapacity {
                requested: capacity,
                max: MAX_SCENE_SLOTS,
            })?;
        Ok(Self {
            bytes: vec![0; len],
            dirty: None,
        })
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.bytes.len() / SLOT_SIZE
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encode `primitive` into `slot`.
    pub fn write(&mut self, slot: usize, primitive: &Primitive) -> Result<(), SceneError> {
        primitive.write_encoded(&mut self.bytes, slot)?;
        self.mark_dirty(slot * SLOT_SIZE..(slot + 1) * SLOT_SIZE);
        Ok(())
    }

    /// Zero `slot`.
    pub fn clear(&mut self, slot: usize) -> Result<(), SceneError> {
        let range = slot_range(self.bytes.len(), slot)?;
        self.bytes[range.clone()].fill(0);
        self.mark_dirty(range);
        Ok(())
    }

    /// Byte range changed since the previous call, if any.
    pub fn take_dirty(&mut self) -> Option<Range<usize>> {
        self.dirty.take()
    }

    /// Flag the whole buffer for upload.
    pub fn mark_all_dirty(&mut self) {
        self.dirty = Some(0..self.bytes.len());
    }

    fn mark_dirty(&mut self, range: Range<usize>) {
        self.dirty = Some(match self.dirty.take() {
            Some(d) => d.start.min(range.start)..d.end.max(range.end),
            None => range,
        });
    }
}

/// Header region holding the active primitive count at offset 0.
#[derive(Debug, Clone)]
pub struct HeaderBuffer {
    bytes: [u8; HEADER_SIZE],
    dirty: bool,
}

impl Default for HeaderBuffer {
    fn default() -> Self {
        Self {
            bytes: [0; HEADER_SIZE],
            dirty: true,
        }
    }
}

impl HeaderBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_primitive_count(&mut self, count: u32) {
        self.bytes[..4].copy_from_slice(&count.to_ne_bytes());
        self.dirty = true;
    }

    pub fn primitive_count(&self) -> u32 {
        u32::from_ne_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True if the count changed since the previous call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use glam::Vec3;

    fn sphere() -> Primitive {
        Primitive::sphere(Vec3::ZERO, 1.0, Material::default())
    }

    #[test]
    fn capacity_matches_allocation() {
        let buf = PrimitiveBuffer::new(8).unwrap();
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.as_bytes().len(), 8 * SLOT_SIZE);
    }

    #[test]
    fn capacity_outside_bounds_is_rejected() {
        for capacity in [0, MAX_SCENE_SLOTS + 1, usize::MAX / 64, usize::MAX] {
            assert_eq!(
                PrimitiveBuffer::new(capacity).unwrap_err(),
                SceneError::InvalidCapacity {
                    requested: capacity,
                    max: MAX_SCENE_SLOTS
                }
            );
        }
        let largest = PrimitiveBuffer::new(MAX_SCENE_SLOTS).unwrap();
        assert_eq!(largest.capacity(), MAX_SCENE_SLOTS);
    }

    #[test]
    fn dirty_range_spans_written_slots() {
        let mut buf = PrimitiveBuffer::new(8).unwrap();
        assert!(buf.take_dirty().is_none());

        buf.write(5, &sphere()).unwrap();
        buf.write(2, &sphere()).unwrap();
        assert_eq!(buf.take_dirty(), Some(2 * SLOT_SIZE..6 * SLOT_SIZE));
        assert!(buf.take_dirty().is_none());
    }

    #[test]
    fn failed_write_does_not_mark_dirty() {
        let mut buf = PrimitiveBuffer::new(2).unwrap();
        assert!(buf.write(2, &sphere()).is_err());
        assert!(buf.take_dirty().is_none());
    }

    #[test]
    fn clear_zeroes_slot() {
        let mut buf = PrimitiveBuffer::new(2).unwrap();
        buf.write(1, &sphere()).unwrap();
        buf.clear(1).unwrap();
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn header_count_round_trips() {
        let mut header = HeaderBuffer::new();
        assert!(header.take_dirty());
        header.set_primitive_count(7);
        assert_eq!(header.primitive_count(), 7);
        assert_eq!(&header.as_bytes()[..4], &7u32.to_ne_bytes());
        assert!(header.as_bytes()[4..].iter().all(|&b| b == 0));
        assert!(header.take_dirty());
        assert!(!header.take_dirty());
    }
}
