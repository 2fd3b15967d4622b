//! Error types for swarm.
//!
//! The animation core itself never fails; these cover loading settings,
//! bringing up the GPU and running the windowed host.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading or validating [`Settings`](crate::config::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid JSON for [`Settings`](crate::config::Settings).
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the engine cannot work with.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a WebGPU/Vulkan/Metal/DX12 capable GPU is required")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors returned by a [`RenderTarget`](crate::render::RenderTarget) draw.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The surface must be reconfigured before the next frame.
    #[error("render surface lost or outdated")]
    SurfaceLost,
    /// Acquiring the next frame timed out; the frame is skipped.
    #[error("timed out acquiring the next frame")]
    Timeout,
    /// The GPU ran out of memory. Not recoverable.
    #[error("GPU out of memory")]
    OutOfMemory,
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            _ => RenderError::SurfaceLost,
        }
    }
}

/// Errors that can occur while running the windowed host.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// A frame could not be rendered.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    /// Settings were rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
