use crate::{DMat3, DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Affine placement of a mesh in the world (translation, rotation, scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    /// Scale about the origin first, then translate.
    pub fn from_translation_scale(translation: Vector3, scale: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(translation) * DMat4::from_scale(scale))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.to_mat4().transform_vector3(v)
    }

    /// Apply `self`, then `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }

    /// Matrix that maps object-space normals into the transformed space:
    /// the inverse transpose of the upper 3x3 block.
    ///
    /// Returns `None` for a singular transform.
    pub fn normal_matrix(&self) -> Option<DMat3> {
        let linear = DMat3::from_mat4(self.to_mat4());
        if linear.determinant().abs() < 1e-15 {
            None
        } else {
            Some(linear.inverse().transpose())
        }
    }

    /// Column-major `f32` columns for uniform upload.
    pub fn to_cols_f32(&self) -> [[f32; 4]; 4] {
        self.to_mat4().as_mat4().to_cols_array_2d()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
