//! Per-frame shader inputs for drawing the streamed surface.

use bytemuck::{Pod, Zeroable};
use ripple_core::{Result, RippleError};
use ripple_math::{DVec3, Transform};

use crate::state::SceneState;

/// World placement of the unit-square surface in the reference scene.
pub fn reference_placement() -> Transform {
    Transform::from_translation_scale(
        DVec3::new(30.0, 20.0, -30.0),
        DVec3::new(200.0 / 3.0, 100.0 / 3.0, 100.0 / 3.0),
    )
}

/// Uniform block laid out for std140: mat4, mat3 padded to three vec4
/// columns, fog as rgb plus density, then gamma.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SurfaceUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
    pub fog: [f32; 4],
    pub gamma: f32,
    pub _padding: [f32; 3],
}

impl SurfaceUniforms {
    /// Build uniforms for a surface placed by `model` and seen through `view`.
    ///
    /// The normal matrix is the inverse transpose of the upper 3x3 of
    /// `view * model`; a singular placement is rejected.
    pub fn new(model: &Transform, view: &Transform, state: &SceneState) -> Result<Self> {
        let model_view = model.then(view);
        let normal = model_view
            .normal_matrix()
            .ok_or_else(|| RippleError::Geometry("surface placement is singular".into()))?;

        let cols = normal.to_cols_array_2d();
        let pad = |c: [f64; 3]| [c[0] as f32, c[1] as f32, c[2] as f32, 0.0];
        let fog = state.fog();

        Ok(Self {
            model: model.to_cols_f32(),
            normal_matrix: [pad(cols[0]), pad(cols[1]), pad(cols[2])],
            fog: [fog.color[0], fog.color[1], fog.color[2], fog.density as f32],
            gamma: state.gamma as f32,
            _padding: [0.0; 3],
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
