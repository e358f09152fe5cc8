//! Error types for Warpfield.
//!
//! The simulation itself never fails; these cover the edges around it:
//! loading configuration, bringing up the GPU presenter, writing snapshots,
//! and running the window loop.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating a [`crate::StarfieldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid JSON for the config schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of its allowed range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture formats.
    #[error("GPU surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Errors that can occur when saving a frame to disk.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// PNG encoding or file write failed.
    #[error("Failed to write snapshot: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors that can occur when running the windowed simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Failed to create or run the event loop.
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
