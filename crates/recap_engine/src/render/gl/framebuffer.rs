//! Offscreen render target for post-processing

use gl::types::{GLsizei, GLuint};

use crate::render::backend::RenderError;
use crate::render::gl::texture::Texture;

/// Color texture plus a depth24/stencil8 renderbuffer
#[derive(Debug)]
pub struct Framebuffer {
    fbo: GLuint,
    rbo: GLuint,
    color: Texture,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let color = Texture::render_target(width, height);
        let (mut fbo, mut rbo) = (0, 0);

        let status = unsafe {
            gl::GenFramebuffers(1, &mut fbo);
            gl::BindFramebuffer(gl::FRAMEBUFFER, fbo);
            gl::FramebufferTexture2D(gl::FRAMEBUFFER, gl::COLOR_ATTACHMENT0, gl::TEXTURE_2D, color.id(), 0);

            gl::GenRenderbuffers(1, &mut rbo);
            gl::BindRenderbuffer(gl::RENDERBUFFER, rbo);
            gl::RenderbufferStorage(gl::RENDERBUFFER, gl::DEPTH24_STENCIL8, width as GLsizei, height as GLsizei);
            gl::FramebufferRenderbuffer(gl::FRAMEBUFFER, gl::DEPTH_STENCIL_ATTACHMENT, gl::RENDERBUFFER, rbo);

            let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
            status
        };

        let framebuffer = Self { fbo, rbo, color };
        if status == gl::FRAMEBUFFER_COMPLETE {
            Ok(framebuffer)
        } else {
            Err(RenderError::Framebuffer(status))
        }
    }

    pub fn bind(&self) {
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, self.fbo) };
    }

    /// Bind the window's default framebuffer
    pub fn unbind() {
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, 0) };
    }

    pub fn color(&self) -> &Texture {
        &self.color
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteRenderbuffers(1, &self.rbo);
            gl::DeleteFramebuffers(1, &self.fbo);
        }
    }
}
