//! wgpu-backed stream storage for the surface vertices.

use std::sync::Arc;

use ripple_core::{Result, RippleError};
use ripple_mesh::{Resolution, VertexRecord};

use crate::upload::{DrawCall, StreamTarget};

const FLOAT_BYTES: u64 = std::mem::size_of::<f32>() as u64;

static VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
    wgpu::VertexAttribute {
        offset: VertexRecord::POSITION_OFFSET as u64 * FLOAT_BYTES,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    },
    wgpu::VertexAttribute {
        offset: VertexRecord::NORMAL_OFFSET as u64 * FLOAT_BYTES,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x3,
    },
    wgpu::VertexAttribute {
        offset: VertexRecord::COLOR_OFFSET as u64 * FLOAT_BYTES,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32x3,
    },
];

/// Interleaved layout of [`VertexRecord`] for pipeline creation.
pub fn surface_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: VertexRecord::STRIDE as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// Primitive state for the surface: triangle list, drawn from both sides.
pub fn surface_primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        ..Default::default()
    }
}

/// Adapter and device with no presentation surface, for offscreen streaming.
pub async fn request_headless_device() -> Result<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| RippleError::Gpu("no compatible adapter found".into()))?;

    log::info!("using adapter: {:?}", adapter.get_info().name);

    adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Ripple Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        )
        .await
        .map_err(|e| RippleError::Gpu(e.to_string()))
}

/// GPU vertex buffer sized once for a resolution and rewritten every frame.
#[derive(Debug)]
pub struct GpuStreamBuffer {
    buffer: wgpu::Buffer,
    queue: Arc<wgpu::Queue>,
    capacity: u64,
}

impl GpuStreamBuffer {
    pub fn new(device: &wgpu::Device, queue: Arc<wgpu::Queue>, resolution: Resolution) -> Self {
        let capacity = resolution.byte_size();
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Surface Stream Buffer"),
            size: capacity,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        log::debug!("allocated {} byte surface stream buffer", capacity);
        Self {
            buffer,
            queue,
            capacity,
        }
    }

    /// Create a device on the default adapter and a buffer on it, blocking.
    pub fn headless(resolution: Resolution) -> Result<(Self, wgpu::Device)> {
        let (device, queue) = pollster::block_on(request_headless_device())?;
        let buffer = Self::new(&device, Arc::new(queue), resolution);
        Ok((buffer, device))
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bind the stream buffer at slot 0 and issue `call`.
    pub fn record_draw(&self, pass: &mut wgpu::RenderPass<'_>, call: DrawCall) {
        pass.set_vertex_buffer(0, self.buffer.slice(..));
        pass.draw(call.vertex_range(), 0..1);
    }
}

impl StreamTarget for GpuStreamBuffer {
    fn capacity_bytes(&self) -> u64 {
        self.capacity
    }

    fn write_full(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.queue.write_buffer(&self.buffer, 0, bytes);
        Ok(())
    }

    /// Submit the staged write so it reaches the buffer before the next draw
    /// and its staging memory is recycled.
    fn flush(&mut self) -> Result<()> {
        self.queue.submit(std::iter::empty::<wgpu::CommandBuffer>());
        Ok(())
    }
}
