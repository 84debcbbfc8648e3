//! Per-frame rebuild loop: animate, tessellate, upload.

use std::time::{Duration, Instant};

use ripple_core::traits::Validate;
use ripple_core::{Result, RippleError, SurfaceConfig};
use ripple_geometry::{Animator, BezierSurface, ControlGrid};
use ripple_mesh::{GridTessellator, Resolution, TriangleBuffer};

use crate::clock::TimeSource;
use crate::upload::{DrawCall, StreamTarget, StreamingUploader};

/// Outcome of a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub t_now: f64,
    pub draw: DrawCall,
    pub rebuild: Duration,
    pub upload: Duration,
}

impl FrameReport {
    pub fn total(&self) -> Duration {
        self.rebuild + self.upload
    }
}

/// Running frame-time statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub over_budget: u64,
    pub total: Duration,
    pub worst: Duration,
}

impl FrameStats {
    fn record(&mut self, elapsed: Duration, over_budget: bool) {
        self.frames += 1;
        self.total += elapsed;
        self.worst = self.worst.max(elapsed);
        if over_budget {
            self.over_budget += 1;
        }
    }

    pub fn average(&self) -> Duration {
        match u32::try_from(self.frames) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total / n,
            Err(_) => Duration::from_secs_f64(self.total.as_secs_f64() / self.frames as f64),
        }
    }
}

/// Owns everything needed to regenerate and stream the surface each frame.
///
/// The triangle buffer and stream storage are sized once at construction
/// for the configured resolution and reused for every frame.
#[derive(Debug)]
pub struct SurfaceStream<T> {
    grid: ControlGrid,
    animator: Animator,
    tessellator: GridTessellator,
    triangles: TriangleBuffer,
    uploader: StreamingUploader<T>,
    frame_budget: Duration,
    stats: FrameStats,
}

impl<T: StreamTarget> SurfaceStream<T> {
    /// Build a stream over an explicit control grid.
    pub fn new(config: &SurfaceConfig, grid: ControlGrid, target: T) -> Result<Self> {
        config.validate()?;
        grid.validate()?;
        if grid.degree_u() != config.degree_u || grid.degree_v() != config.degree_v {
            return Err(RippleError::InvalidConfig(format!(
                "control grid has degrees ({}, {}) but config expects ({}, {})",
                grid.degree_u(),
                grid.degree_v(),
                config.degree_u,
                config.degree_v
            )));
        }

        let frame_budget = Duration::try_from_secs_f64(config.frame_budget_ms / 1000.0)
            .map_err(|e| RippleError::InvalidConfig(format!("frame budget: {}", e)))?;
        let tessellator = GridTessellator::from_config(config)?;
        let resolution = tessellator.resolution();
        let uploader = StreamingUploader::new(target, resolution.byte_size())?;

        log::info!(
            "surface stream: degree ({}, {}), {}x{} samples, {} vertices per frame",
            config.degree_u,
            config.degree_v,
            resolution.u_samples(),
            resolution.v_samples(),
            resolution.vertex_count()
        );

        Ok(Self {
            grid,
            animator: Animator::new(config.animation_strength),
            tessellator,
            triangles: TriangleBuffer::with_capacity_for(resolution),
            uploader,
            frame_budget,
            stats: FrameStats::default(),
        })
    }

    /// Build a stream over a control grid randomized from `config.seed`.
    pub fn from_config(config: &SurfaceConfig, target: T) -> Result<Self> {
        let grid = ControlGrid::from_config(config)?;
        Self::new(config, grid, target)
    }

    /// Regenerate the surface for `t_now` and push it to the target.
    ///
    /// Frames that exceed the budget are logged, never skipped.
    pub fn frame(&mut self, t_now: f64) -> Result<FrameReport> {
        let started = Instant::now();
        let surface = BezierSurface::new(self.animator.animate(&self.grid, t_now));
        self.tessellator.tessellate(&surface, &mut self.triangles);
        let rebuilt = Instant::now();

        let draw = self.uploader.upload(&self.triangles)?;
        let report = FrameReport {
            t_now,
            draw,
            rebuild: rebuilt - started,
            upload: rebuilt.elapsed(),
        };

        let elapsed = report.total();
        let over_budget = elapsed > self.frame_budget;
        if over_budget {
            log::warn!(
                "frame at t={:.3}s took {:.2}ms, budget {:.2}ms",
                t_now,
                elapsed.as_secs_f64() * 1000.0,
                self.frame_budget.as_secs_f64() * 1000.0
            );
        }
        self.stats.record(elapsed, over_budget);
        Ok(report)
    }

    /// Run one frame at the time reported by `clock`.
    pub fn frame_from(&mut self, clock: &mut dyn TimeSource) -> Result<FrameReport> {
        let t_now = clock.now_seconds();
        self.frame(t_now)
    }

    pub fn grid(&self) -> &ControlGrid {
        &self.grid
    }

    pub fn resolution(&self) -> Resolution {
        self.tessellator.resolution()
    }

    /// Triangles from the most recent frame.
    pub fn triangles(&self) -> &TriangleBuffer {
        &self.triangles
    }

    pub fn target(&self) -> &T {
        self.uploader.target()
    }

    pub fn target_mut(&mut self) -> &mut T {
        self.uploader.target_mut()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedStepClock;
    use crate::upload::HostBuffer;

    fn small_config() -> SurfaceConfig {
        SurfaceConfig {
            u_samples: 5,
            v_samples: 4,
            parallel: false,
            ..SurfaceConfig::default()
        }
    }

    #[test]
    fn test_frame_uploads_full_grid() {
        let config = small_config();
        let capacity = Resolution::from_config(&config).unwrap().byte_size() as usize;
        let mut stream = SurfaceStream::from_config(&config, HostBuffer::with_capacity(capacity)).unwrap();

        let report = stream.frame(0.25).unwrap();
        assert_eq!(report.draw.vertex_count, 4 * 3 * 6);
        assert_eq!(stream.target().contents(), stream.triangles().as_bytes());
        assert_eq!(stream.stats().frames, 1);
    }

    #[test]
    fn test_undersized_target_is_fatal() {
        let config = small_config();
        let err = SurfaceStream::from_config(&config, HostBuffer::with_capacity(64)).unwrap_err();
        assert!(matches!(err, RippleError::Capacity { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_grid_degree_mismatch_rejected() {
        let config = small_config();
        let grid = ControlGrid::flat(2, 3).unwrap();
        let capacity = Resolution::from_config(&config).unwrap().byte_size() as usize;
        let err = SurfaceStream::new(&config, grid, HostBuffer::with_capacity(capacity)).unwrap_err();
        assert!(matches!(err, RippleError::InvalidConfig(_)));
    }

    #[test]
    fn test_unbounded_frame_budget_rejected() {
        let config = SurfaceConfig {
            frame_budget_ms: f64::INFINITY,
            ..small_config()
        };
        let capacity = Resolution::from_config(&small_config()).unwrap().byte_size() as usize;
        let err = SurfaceStream::from_config(&config, HostBuffer::with_capacity(capacity)).unwrap_err();
        assert!(matches!(err, RippleError::InvalidConfig(_)));
    }

    #[test]
    fn test_frame_from_clock_uses_clock_time() {
        let config = small_config();
        let capacity = Resolution::from_config(&config).unwrap().byte_size() as usize;
        let mut stream = SurfaceStream::from_config(&config, HostBuffer::with_capacity(capacity)).unwrap();
        let mut clock = FixedStepClock::new(2.0, 0.5);

        assert_eq!(stream.frame_from(&mut clock).unwrap().t_now, 2.0);
        assert_eq!(stream.frame_from(&mut clock).unwrap().t_now, 2.5);
        assert_eq!(stream.target().write_count(), 2);
    }

    #[test]
    fn test_stats_average() {
        let mut stats = FrameStats::default();
        assert_eq!(stats.average(), Duration::ZERO);
        stats.record(Duration::from_millis(10), false);
        stats.record(Duration::from_millis(30), true);
        assert_eq!(stats.average(), Duration::from_millis(20));
        assert_eq!(stats.worst, Duration::from_millis(30));
        assert_eq!(stats.over_budget, 1);
    }
}
