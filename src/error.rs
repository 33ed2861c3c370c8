//! Crate-wide error type.

use quick_error::quick_error;
use std::io;

quick_error! {
    /// Anything that can go wrong while setting up the window, the GPU, or
    /// loading image assets. Scene-graph mutation and the angle computation
    /// never fail and therefore have no representation here.
    #[derive(Debug)]
    pub enum Error {
        /// Reading an asset from disk failed.
        Io(err: io::Error) {
            from()
            display("i/o error: {}", err)
            source(err)
        }
        /// Decoding an image asset failed.
        Image(err: image::ImageError) {
            from()
            display("image decode error: {}", err)
            source(err)
        }
        /// Pixel buffer does not match the declared texture dimensions.
        TextureSize(expected: usize, actual: usize) {
            display("texture pixel buffer holds {} bytes, expected {}", actual, expected)
        }
        /// The winit event loop could not be created or exited abnormally.
        EventLoop(err: winit::error::EventLoopError) {
            from()
            display("event loop error: {}", err)
            source(err)
        }
        /// The OS refused to create a window.
        Window(err: winit::error::OsError) {
            from()
            display("window creation failed: {}", err)
            source(err)
        }
        /// The GPU surface could not be created for the window.
        CreateSurface(err: wgpu::CreateSurfaceError) {
            from()
            display("surface creation failed: {}", err)
            source(err)
        }
        /// No suitable GPU adapter is available.
        NoAdapter(err: wgpu::RequestAdapterError) {
            from()
            display("no suitable GPU adapter: {}", err)
            source(err)
        }
        /// The adapter refused to provide a device with the requested limits.
        RequestDevice(err: wgpu::RequestDeviceError) {
            from()
            display("device request failed: {}", err)
            source(err)
        }
        /// The swapchain ran out of memory.
        SurfaceOutOfMemory {
            display("surface ran out of memory")
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
