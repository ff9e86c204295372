//! Flat attribute export for the renderer.
//!
//! [`AttributeBuffers`] holds four parallel arrays, index-aligned to the
//! depth-sorted particle order:
//!
//! | Buffer | Floats per particle | Contents |
//! |--------|---------------------|----------|
//! | positions | 3 | x, y, z |
//! | sizes | 1 | derived `current_size` |
//! | colors | 4 | r, g, b, alpha |
//! | rotations | 1 | radians |
//!
//! All four are regenerated from scratch every tick; the contract requires
//! no diffing. Byte views are available for direct vertex-buffer upload.

use crate::particle::ParticleStore;

/// Parallel attribute arrays for one tick's particle set.
#[derive(Clone, Debug, Default)]
pub struct AttributeBuffers {
    positions: Vec<f32>,
    sizes: Vec<f32>,
    colors: Vec<f32>,
    rotations: Vec<f32>,
}

impl AttributeBuffers {
    /// Create empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Regenerate all four arrays from the store, in store order.
    ///
    /// Call after the depth sort so the arrays land back-to-front.
    pub fn rebuild(&mut self, store: &ParticleStore) {
        self.positions.clear();
        self.sizes.clear();
        self.colors.clear();
        self.rotations.clear();

        for p in store.iter() {
            self.positions
                .extend_from_slice(&[p.position.x, p.position.y, p.position.z]);
            self.sizes.push(p.current_size);
            self.colors
                .extend_from_slice(&[p.color.x, p.color.y, p.color.z, p.alpha]);
            self.rotations.push(p.rotation);
        }
    }

    /// Number of exported particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether no particles are exported.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// xyz triplets.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// One derived size per particle.
    #[inline]
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// rgba quadruplets.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// One rotation per particle, radians.
    #[inline]
    pub fn rotations(&self) -> &[f32] {
        &self.rotations
    }

    /// Positions as raw bytes for vertex-buffer upload.
    #[inline]
    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Sizes as raw bytes.
    #[inline]
    pub fn sizes_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }

    /// Colors as raw bytes.
    #[inline]
    pub fn colors_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Rotations as raw bytes.
    #[inline]
    pub fn rotations_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.rotations)
    }
}
