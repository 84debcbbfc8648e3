use bytemuck::{Pod, Zeroable};
use ripple_math::{Point3, Vector3};

/// Interleaved vertex as laid out in the streamed GPU buffer.
///
/// Nine `f32`: position, normal, color. Renderers binding the buffer must use
/// [`VertexRecord::STRIDE`] and the attribute offsets below.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VertexRecord {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl VertexRecord {
    /// Floats per vertex.
    pub const FLOATS: usize = 9;
    /// Bytes per vertex.
    pub const STRIDE: usize = std::mem::size_of::<VertexRecord>();
    /// Attribute offsets in floats.
    pub const POSITION_OFFSET: usize = 0;
    pub const NORMAL_OFFSET: usize = 3;
    pub const COLOR_OFFSET: usize = 6;

    pub fn new(position: Point3, normal: Vector3, color: [f32; 3]) -> Self {
        Self {
            position: position.as_vec3().to_array(),
            normal: normal.as_vec3().to_array(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_math::DVec3;

    #[test]
    fn test_layout() {
        assert_eq!(VertexRecord::STRIDE, 36);
        assert_eq!(VertexRecord::STRIDE, VertexRecord::FLOATS * std::mem::size_of::<f32>());
        assert_eq!(std::mem::offset_of!(VertexRecord, position), VertexRecord::POSITION_OFFSET * 4);
        assert_eq!(std::mem::offset_of!(VertexRecord, normal), VertexRecord::NORMAL_OFFSET * 4);
        assert_eq!(std::mem::offset_of!(VertexRecord, color), VertexRecord::COLOR_OFFSET * 4);
    }

    #[test]
    fn test_new_packs_f32() {
        let v = VertexRecord::new(DVec3::new(1.0, 2.0, 3.0), DVec3::Z, [0.4, 0.3, 0.6]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 0.4, 0.3, 0.6]);
    }
}
