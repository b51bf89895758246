use serde::{Deserialize, Serialize};

use crate::buffer::{HeaderBuffer, PrimitiveBuffer};
use crate::error::SceneError;
use crate::primitive::Primitive;

/// Scene sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Number of primitive slots in the encoded buffer.
    pub max_slots: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { max_slots: 64 }
    }
}

/// Flat, insertion-ordered primitive list together with its encoded buffers.
///
/// Primitive `i` always lives in slot `i`. Every mutation re-encodes the
/// affected slot and keeps the header count equal to `len()`.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    buffer: PrimitiveBuffer,
    header: HeaderBuffer,
}

impl Scene {
    /// Create an empty scene with `config.max_slots` zeroed slots.
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let buffer = PrimitiveBuffer::new(config.max_slots)?;
        let mut header = HeaderBuffer::new();
        header.set_primitive_count(0);
        Ok(Self {
            primitives: Vec::with_capacity(config.max_slots),
            buffer,
            header,
        })
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Append a primitive, encode it into the next slot and return its index.
    pub fn push(&mut self, primitive: Primitive) -> Result<usize, SceneError> {
        let index = self.primitives.len();
        if index >= self.capacity() {
            return Err(SceneError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        self.buffer.write(index, &primitive)?;
        self.primitives.push(primitive);
        self.sync_count();
        tracing::debug!(index, kind = ?primitive.kind(), "primitive added");
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&Primitive> {
        self.primitives.get(index)
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Mutate primitive `index` and re-encode its slot.
    ///
    /// If the edited primitive no longer encodes, the previous value is kept.
    pub fn update<F>(&mut self, index: usize, edit: F) -> Result<(), SceneError>
    where
        F: FnOnce(&mut Primitive),
    {
        let current = self
            .primitives
            .get(index)
            .copied()
            .ok_or(SceneError::NoSuchPrimitive(index))?;
        let mut edited = current;
        edit(&mut edited);
        self.buffer.write(index, &edited)?;
        self.primitives[index] = edited;
        tracing::debug!(index, "primitive re-encoded");
        Ok(())
    }

    /// Remove every primitive past `len` and zero their slots.
    pub fn truncate(&mut self, len: usize) {
        while self.primitives.len() > len {
            let index = self.primitives.len() - 1;
            self.primitives.pop();
            let cleared = self.buffer.clear(index);
            debug_assert!(cleared.is_ok(), "primitive {index} beyond buffer capacity");
        }
        self.sync_count();
    }

    /// Re-encode every slot, e.g. after the GPU copy was lost.
    pub fn encode_all(&mut self) -> Result<(), SceneError> {
        for (index, primitive) in self.primitives.iter().enumerate() {
            self.buffer.write(index, primitive)?;
        }
        self.buffer.mark_all_dirty();
        self.sync_count();
        Ok(())
    }

    pub fn buffer(&self) -> &PrimitiveBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PrimitiveBuffer {
        &mut self.buffer
    }

    pub fn header(&self) -> &HeaderBuffer {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut HeaderBuffer {
        &mut self.header
    }

    fn sync_count(&mut self) {
        // Bounded by capacity, which is far below u32::MAX in practice.
        self.header.set_primitive_count(self.primitives.len() as u32);
    }
}
