pub mod bernstein;
pub mod binomial;
pub mod normal;
pub mod power;
pub mod transform;

pub use glam::{DMat3, DMat4, DVec3};

pub use bernstein::{bernstein, bernstein_row, BasisRow};
pub use binomial::binomial;
pub use normal::{safe_normalize, REFERENCE_UP};
pub use power::powi;
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
