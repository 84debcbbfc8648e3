use crate::grid::{Resolution, VERTICES_PER_CELL};
use crate::vertex::VertexRecord;

/// Flat, ordered vertex stream of independent triangles.
///
/// Owned by the surface engine and rebuilt from scratch every frame; the
/// contents are viewable as `f32`s or bytes without copying.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleBuffer {
    vertices: Vec<VertexRecord>,
}

impl TriangleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for a full rebuild at `resolution`.
    pub fn with_capacity_for(resolution: Resolution) -> Self {
        Self {
            vertices: Vec::with_capacity(resolution.vertex_count()),
        }
    }

    pub fn vertices(&self) -> &[VertexRecord] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn cell_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_CELL
    }

    /// Interleaved floats, [`VertexRecord::FLOATS`] per vertex.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn byte_len(&self) -> u64 {
        (self.vertices.len() * VertexRecord::STRIDE) as u64
    }

    /// Discard the contents and expose `len` zeroed vertices for a rebuild.
    pub(crate) fn reset(&mut self, len: usize) -> &mut [VertexRecord] {
        self.vertices.clear();
        self.vertices.resize(len, VertexRecord::default());
        &mut self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buffer = TriangleBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.byte_len(), 0);
        assert!(buffer.as_floats().is_empty());
    }

    #[test]
    fn test_views_share_layout() {
        let mut buffer = TriangleBuffer::new();
        let vertices = buffer.reset(6);
        vertices[1].position = [1.0, 2.0, 3.0];
        vertices[5].color = [0.5, 0.5, 0.5];

        assert_eq!(buffer.len(), 6);
        assert_eq!(buffer.triangle_count(), 2);
        assert_eq!(buffer.cell_count(), 1);
        assert_eq!(buffer.as_floats().len(), 6 * VertexRecord::FLOATS);
        assert_eq!(buffer.as_bytes().len() as u64, buffer.byte_len());
        assert_eq!(&buffer.as_floats()[9..12], &[1.0, 2.0, 3.0]);
        assert_eq!(buffer.as_floats()[5 * 9 + VertexRecord::COLOR_OFFSET], 0.5);
    }

    #[test]
    fn test_capacity_for_resolution() {
        let res = Resolution::new(5, 5).unwrap();
        let buffer = TriangleBuffer::with_capacity_for(res);
        assert!(buffer.vertices.capacity() >= res.vertex_count());
        assert!(buffer.is_empty());
    }
}
