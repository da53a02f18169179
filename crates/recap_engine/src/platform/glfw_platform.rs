//! GLFW window with an OpenGL 3.3 core context

use glfw::{Action, Context, Key};

use crate::config::WindowConfig;
use crate::input::{InputSource, KeyCode};
use crate::platform::{Platform, PlatformError, PlatformEvent};

/// GLFW window wrapper with proper resource management
pub struct GlfwPlatform {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwPlatform {
    /// Open the window, make its context current and load GL entry points
    ///
    /// The cursor is captured for mouse look.
    pub fn new(config: &WindowConfig) -> Result<Self, PlatformError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| PlatformError::InitializationFailed(format!("{:?}", e)))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

        let created = glfw.with_primary_monitor(|glfw, monitor| {
            let mode = match monitor {
                Some(monitor) if config.fullscreen => glfw::WindowMode::FullScreen(monitor),
                _ => glfw::WindowMode::Windowed,
            };
            glfw.create_window(config.width, config.height, &config.title, mode)
        });
        let (mut window, events) = created.ok_or(PlatformError::CreationFailed)?;

        window.make_current();
        gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

        window.set_cursor_mode(glfw::CursorMode::Disabled);
        window.set_cursor_pos_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        log::info!(
            "Opened '{}' at {}x{}{}",
            config.title,
            config.width,
            config.height,
            if config.fullscreen { " (fullscreen)" } else { "" }
        );
        Ok(Self { glfw, window, events })
    }
}

impl InputSource for GlfwPlatform {
    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.window.get_key(glfw_key(key)) == Action::Press
    }
}

impl Platform for GlfwPlatform {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| match event {
                glfw::WindowEvent::CursorPos(x, y) => Some(PlatformEvent::CursorMoved { x, y }),
                glfw::WindowEvent::FramebufferSize(width, height) => Some(PlatformEvent::FramebufferResized {
                    width: u32::try_from(width).unwrap_or(0),
                    height: u32::try_from(height).unwrap_or(0),
                }),
                glfw::WindowEvent::Close => Some(PlatformEvent::CloseRequested),
                _ => None,
            })
            .collect()
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (u32::try_from(width).unwrap_or(0), u32::try_from(height).unwrap_or(0))
    }
}

fn glfw_key(key: KeyCode) -> Key {
    match key {
        KeyCode::A => Key::A,
        KeyCode::B => Key::B,
        KeyCode::C => Key::C,
        KeyCode::D => Key::D,
        KeyCode::E => Key::E,
        KeyCode::F => Key::F,
        KeyCode::G => Key::G,
        KeyCode::H => Key::H,
        KeyCode::I => Key::I,
        KeyCode::J => Key::J,
        KeyCode::K => Key::K,
        KeyCode::L => Key::L,
        KeyCode::M => Key::M,
        KeyCode::N => Key::N,
        KeyCode::O => Key::O,
        KeyCode::P => Key::P,
        KeyCode::Q => Key::Q,
        KeyCode::R => Key::R,
        KeyCode::S => Key::S,
        KeyCode::T => Key::T,
        KeyCode::U => Key::U,
        KeyCode::V => Key::V,
        KeyCode::W => Key::W,
        KeyCode::X => Key::X,
        KeyCode::Y => Key::Y,
        KeyCode::Z => Key::Z,
        KeyCode::Num0 => Key::Num0,
        KeyCode::Num1 => Key::Num1,
        KeyCode::Num2 => Key::Num2,
        KeyCode::Num3 => Key::Num3,
        KeyCode::Num4 => Key::Num4,
        KeyCode::Num5 => Key::Num5,
        KeyCode::Num6 => Key::Num6,
        KeyCode::Num7 => Key::Num7,
        KeyCode::Num8 => Key::Num8,
        KeyCode::Num9 => Key::Num9,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Space => Key::Space,
        KeyCode::Enter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::LeftShift => Key::LeftShift,
    }
}
