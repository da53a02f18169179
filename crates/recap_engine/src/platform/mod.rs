//! Window, context and OS input
//!
//! The engine loop only sees the [`Platform`] trait; [`GlfwPlatform`] is the
//! real window, tests use a scripted implementation.

mod glfw_platform;

pub use glfw_platform::GlfwPlatform;

use thiserror::Error;

use crate::input::InputSource;

/// Window events the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// Absolute cursor position in screen coordinates
    CursorMoved { x: f64, y: f64 },
    FramebufferResized { width: u32, height: u32 },
    CloseRequested,
}

/// Window management errors
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Window creation failed")]
    CreationFailed,
}

/// A window with a current rendering context and keyboard state
pub trait Platform: InputSource {
    /// Process pending OS events
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    fn should_close(&self) -> bool;

    fn set_should_close(&mut self, should_close: bool);

    /// Present the finished frame
    fn swap_buffers(&mut self);

    /// Framebuffer size in pixels
    fn framebuffer_size(&self) -> (u32, u32);
}
