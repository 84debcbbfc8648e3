//! Streaming of the rebuilt triangle buffer into pre-sized vertex storage.
//!
//! Storage is allocated once for the fixed resolution. Every frame replaces
//! its whole contents from offset 0; it is never reallocated and never
//! patched piecewise.

use std::ops::Range;

use ripple_core::{Result, RippleError};
use ripple_mesh::TriangleBuffer;

/// Vertex storage that the uploader writes into.
pub trait StreamTarget {
    /// Bytes allocated when the target was created.
    fn capacity_bytes(&self) -> u64;

    /// Replace the contents starting at offset 0.
    ///
    /// Callers guarantee `bytes.len() <= capacity_bytes()`.
    fn write_full(&mut self, bytes: &[u8]) -> Result<()>;

    /// Make the last write visible to the consumer. Called once per upload,
    /// after `write_full`.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Host-memory stand-in for GPU storage, used for headless runs and tests.
#[derive(Debug, Clone)]
pub struct HostBuffer {
    storage: Vec<u8>,
    written: usize,
    writes: u64,
}

impl HostBuffer {
    pub fn with_capacity(capacity_bytes: usize) -> Self {
        Self {
            storage: vec![0; capacity_bytes],
            written: 0,
            writes: 0,
        }
    }

    /// Bytes written by the last upload.
    pub fn contents(&self) -> &[u8] {
        &self.storage[..self.written]
    }

    /// The whole allocation, including bytes past the last upload.
    pub fn storage(&self) -> &[u8] {
        &self.storage
    }

    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl StreamTarget for HostBuffer {
    fn capacity_bytes(&self) -> u64 {
        self.storage.len() as u64
    }

    fn write_full(&mut self, bytes: &[u8]) -> Result<()> {
        let capacity = self.storage.len() as u64;
        let dst = self.storage.get_mut(..bytes.len()).ok_or(RippleError::Capacity {
            required: bytes.len() as u64,
            capacity,
        })?;
        dst.copy_from_slice(bytes);
        self.written = bytes.len();
        self.writes += 1;
        Ok(())
    }
}

/// One non-indexed triangle-list draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub first_vertex: u32,
    pub vertex_count: u32,
}

impl DrawCall {
    pub fn triangles(vertex_count: u32) -> Self {
        Self {
            first_vertex: 0,
            vertex_count,
        }
    }

    pub fn vertex_range(&self) -> Range<u32> {
        self.first_vertex..self.first_vertex + self.vertex_count
    }

    pub fn triangle_count(&self) -> u32 {
        self.vertex_count / 3
    }
}

/// Pushes each frame's triangle buffer into a [`StreamTarget`].
#[derive(Debug)]
pub struct StreamingUploader<T> {
    target: T,
    uploads: u64,
}

impl<T: StreamTarget> StreamingUploader<T> {
    /// Wrap `target`, checking up front that it can hold `required_bytes`.
    pub fn new(target: T, required_bytes: u64) -> Result<Self> {
        let capacity = target.capacity_bytes();
        if required_bytes > capacity {
            log::error!(
                "stream target holds {} bytes but frames need {}; storage must be sized for the configured resolution",
                capacity,
                required_bytes
            );
            return Err(RippleError::Capacity {
                required: required_bytes,
                capacity,
            });
        }
        log::debug!("streaming uploader ready: {} of {} bytes per frame", required_bytes, capacity);
        Ok(Self { target, uploads: 0 })
    }

    /// Transfer the whole buffer and describe the draw that consumes it.
    ///
    /// A buffer larger than the target's capacity is a fatal configuration
    /// error; nothing is written in that case.
    pub fn upload(&mut self, buffer: &TriangleBuffer) -> Result<DrawCall> {
        let required = buffer.byte_len();
        let capacity = self.target.capacity_bytes();
        if required > capacity {
            log::error!(
                "refusing upload of {} bytes into {}-byte stream storage",
                required,
                capacity
            );
            return Err(RippleError::Capacity { required, capacity });
        }

        let vertex_count = u32::try_from(buffer.len()).map_err(|_| {
            RippleError::InvalidConfig(format!("{} vertices exceed a single draw", buffer.len()))
        })?;

        self.target.write_full(buffer.as_bytes())?;
        self.target.flush()?;
        self.uploads += 1;
        Ok(DrawCall::triangles(vertex_count))
    }

    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }
}
