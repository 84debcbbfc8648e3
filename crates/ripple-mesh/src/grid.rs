//! Regular-grid tessellation of a parametric surface into independent triangles.
//!
//! Every call rebuilds the whole buffer. The animated height field moves every
//! control point each frame, so no cell can be reused and a full rebuild keeps
//! the output free of stale regions.

use rayon::prelude::*;
use ripple_core::traits::Validate;
use ripple_core::{Result, RippleError, SurfaceConfig, Tolerance};
use ripple_geometry::{Surface, SurfaceSample};
use ripple_math::safe_normalize;
use serde::{Deserialize, Serialize};

use crate::buffer::TriangleBuffer;
use crate::vertex::VertexRecord;

/// Vertices emitted per grid cell (two triangles).
pub const VERTICES_PER_CELL: usize = 6;

/// Per-vertex offsets `(di, dj)` of the emitted cell corners, as paired tables.
///
/// Triangle 1 is bottom-left, bottom-right, top-left; triangle 2 is top-left,
/// bottom-right, top-right. Lighting and culling rely on this winding.
pub const QUAD_DI: [usize; VERTICES_PER_CELL] = [0, 1, 0, 0, 1, 1];
pub const QUAD_DJ: [usize; VERTICES_PER_CELL] = [0, 0, 1, 1, 0, 1];

/// Number of parametric samples per axis, both ends of `[0, 1]` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawResolution")]
pub struct Resolution {
    u_samples: usize,
    v_samples: usize,
}

#[derive(Deserialize)]
struct RawResolution {
    u_samples: usize,
    v_samples: usize,
}

impl TryFrom<RawResolution> for Resolution {
    type Error = RippleError;

    fn try_from(raw: RawResolution) -> Result<Self> {
        Self::new(raw.u_samples, raw.v_samples)
    }
}

impl Resolution {
    pub const REFERENCE: Resolution = Resolution {
        u_samples: 50,
        v_samples: 50,
    };

    pub fn new(u_samples: usize, v_samples: usize) -> Result<Self> {
        let resolution = Self {
            u_samples,
            v_samples,
        };
        resolution.validate()?;
        Ok(resolution)
    }

    pub fn from_config(config: &SurfaceConfig) -> Result<Self> {
        Self::new(config.u_samples, config.v_samples)
    }

    pub fn u_samples(&self) -> usize {
        self.u_samples
    }

    pub fn v_samples(&self) -> usize {
        self.v_samples
    }

    pub fn sample_count(&self) -> usize {
        self.u_samples * self.v_samples
    }

    pub fn cell_count(&self) -> usize {
        (self.u_samples - 1) * (self.v_samples - 1)
    }

    /// Vertices in a full triangle buffer: `(u - 1)(v - 1) * 6`.
    pub fn vertex_count(&self) -> usize {
        self.cell_count() * VERTICES_PER_CELL
    }

    /// Bytes in a full triangle buffer.
    pub fn byte_size(&self) -> u64 {
        (self.vertex_count() * VertexRecord::STRIDE) as u64
    }

    /// Parameter of sample `i` along u; exactly 0 and 1 at the ends.
    pub fn u_at(&self, i: usize) -> f64 {
        i as f64 / (self.u_samples - 1) as f64
    }

    pub fn v_at(&self, j: usize) -> f64 {
        j as f64 / (self.v_samples - 1) as f64
    }
}

impl Validate for Resolution {
    fn validate(&self) -> Result<()> {
        if self.u_samples < 2 || self.v_samples < 2 {
            return Err(RippleError::InvalidConfig(format!(
                "resolution must be at least 2x2, got {}x{}",
                self.u_samples, self.v_samples
            )));
        }
        Ok(())
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Dense table of evaluated samples with unit normals, row-major by v then u.
#[derive(Debug, Clone)]
pub struct SampleTable {
    resolution: Resolution,
    samples: Vec<SurfaceSample>,
}

impl SampleTable {
    fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            samples: vec![SurfaceSample::default(); resolution.sample_count()],
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&SurfaceSample> {
        if i < self.resolution.u_samples && j < self.resolution.v_samples {
            Some(&self.samples[self.index(i, j)])
        } else {
            None
        }
    }

    pub fn samples(&self) -> &[SurfaceSample] {
        &self.samples
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        j * self.resolution.u_samples + i
    }
}

/// Samples a surface on a fixed grid and expands each cell into two triangles.
#[derive(Debug, Clone)]
pub struct GridTessellator {
    resolution: Resolution,
    color: [f32; 3],
    tolerance: Tolerance,
    parallel: bool,
    table: SampleTable,
}

impl GridTessellator {
    pub fn new(resolution: Resolution, color: [f32; 3]) -> Self {
        Self {
            resolution,
            color,
            tolerance: Tolerance::default(),
            parallel: false,
            table: SampleTable::new(resolution),
        }
    }

    pub fn from_config(config: &SurfaceConfig) -> Result<Self> {
        let resolution = Resolution::from_config(config)?;
        Ok(Self::new(resolution, config.surface_color)
            .with_tolerance(config.tolerance)
            .with_parallel(config.parallel))
    }

    /// Evaluate samples and cells on the rayon pool. The output is identical
    /// to the serial path.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    /// Samples from the most recent call to [`GridTessellator::tessellate`].
    pub fn samples(&self) -> &SampleTable {
        &self.table
    }

    /// Rebuild `out` from scratch for the current shape of `surface`.
    ///
    /// Afterwards `out` holds exactly `resolution.vertex_count()` vertices.
    /// A raw normal too short to normalize is replaced by the reference
    /// up-vector `(0, 0, 1)`.
    pub fn tessellate(&mut self, surface: &dyn Surface, out: &mut TriangleBuffer) {
        self.sample(surface);
        self.emit(out);
        log::trace!(
            "tessellated {}x{} grid into {} vertices",
            self.resolution.u_samples,
            self.resolution.v_samples,
            out.len()
        );
    }

    fn sample(&mut self, surface: &dyn Surface) {
        let resolution = self.resolution;
        let tolerance = self.tolerance;
        let evaluate = move |idx: usize, slot: &mut SurfaceSample| {
            let i = idx % resolution.u_samples;
            let j = idx / resolution.u_samples;
            let raw = surface.sample_at(resolution.u_at(i), resolution.v_at(j));
            *slot = SurfaceSample {
                position: raw.position,
                normal: safe_normalize(raw.normal, tolerance),
            };
        };

        if self.parallel {
            self.table
                .samples
                .par_iter_mut()
                .enumerate()
                .for_each(|(idx, slot)| evaluate(idx, slot));
        } else {
            self.table
                .samples
                .iter_mut()
                .enumerate()
                .for_each(|(idx, slot)| evaluate(idx, slot));
        }
    }

    fn emit(&self, out: &mut TriangleBuffer) {
        let cells_v = self.resolution.v_samples - 1;
        let table = &self.table;
        let color = self.color;

        // Cells are ordered i-major; each owns a fixed 6-vertex slot.
        let fill = move |cell: usize, quad: &mut [VertexRecord]| {
            let i = cell / cells_v;
            let j = cell % cells_v;
            for (k, vertex) in quad.iter_mut().enumerate() {
                let sample = &table.samples[table.index(i + QUAD_DI[k], j + QUAD_DJ[k])];
                *vertex = VertexRecord::new(sample.position, sample.normal, color);
            }
        };

        let vertices = out.reset(self.resolution.vertex_count());
        if self.parallel {
            vertices
                .par_chunks_mut(VERTICES_PER_CELL)
                .enumerate()
                .for_each(|(cell, quad)| fill(cell, quad));
        } else {
            vertices
                .chunks_mut(VERTICES_PER_CELL)
                .enumerate()
                .for_each(|(cell, quad)| fill(cell, quad));
        }
    }
}
