//! GLSL program compilation and uniform upload

use std::collections::HashMap;
use std::ffi::CString;
use std::path::Path;

use gl::types::{GLchar, GLenum, GLint, GLuint};

use crate::render::backend::{RenderError, UniformValue};
use crate::render::ShaderType;

/// A linked program; id 0 marks a program that failed to build
#[derive(Debug)]
pub struct ShaderProgram {
    id: GLuint,
    locations: HashMap<String, GLint>,
}

impl ShaderProgram {
    /// A program that ignores every call
    pub fn unusable() -> Self {
        Self {
            id: 0,
            locations: HashMap::new(),
        }
    }

    /// Compile and link a program from source files
    pub fn from_files(kind: ShaderType, vertex: &Path, fragment: &Path) -> Result<Self, RenderError> {
        let vertex_source = read_source(vertex)?;
        let fragment_source = read_source(fragment)?;

        let vertex_shader = compile(gl::VERTEX_SHADER, &vertex_source, vertex)?;
        let fragment_shader = match compile(gl::FRAGMENT_SHADER, &fragment_source, fragment) {
            Ok(shader) => shader,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex_shader) };
                return Err(e);
            }
        };

        let id = unsafe {
            let id = gl::CreateProgram();
            gl::AttachShader(id, vertex_shader);
            gl::AttachShader(id, fragment_shader);
            gl::LinkProgram(id);
            gl::DeleteShader(vertex_shader);
            gl::DeleteShader(fragment_shader);
            id
        };

        let mut success = GLint::from(gl::FALSE);
        unsafe { gl::GetProgramiv(id, gl::LINK_STATUS, &mut success) };
        if success == GLint::from(gl::FALSE) {
            let log = info_log(id, gl::GetProgramiv, gl::GetProgramInfoLog);
            unsafe { gl::DeleteProgram(id) };
            return Err(RenderError::ShaderLink(kind, log));
        }

        log::info!("Built {:?} program from {:?} and {:?}", kind, vertex, fragment);
        Ok(Self {
            id,
            locations: HashMap::new(),
        })
    }

    pub fn is_usable(&self) -> bool {
        self.id != 0
    }

    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) };
    }

    /// Set a uniform; the program must be bound
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) {
        if !self.is_usable() {
            return;
        }
        let location = self.location(name);
        if location < 0 {
            return;
        }

        unsafe {
            match value {
                UniformValue::Int(v) => gl::Uniform1i(location, v),
                UniformValue::Float(v) => gl::Uniform1f(location, v),
                UniformValue::Vec3(v) => gl::Uniform3fv(location, 1, v.as_ptr()),
                UniformValue::Mat3(m) => gl::UniformMatrix3fv(location, 1, gl::FALSE, m.as_ptr()),
                UniformValue::Mat4(m) => gl::UniformMatrix4fv(location, 1, gl::FALSE, m.as_ptr()),
            }
        }
    }

    fn location(&mut self, name: &str) -> GLint {
        if let Some(&location) = self.locations.get(name) {
            return location;
        }
        let location = match CString::new(name) {
            Ok(c_name) => unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) },
            Err(_) => -1,
        };
        self.locations.insert(name.to_string(), location);
        location
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if self.is_usable() {
            unsafe { gl::DeleteProgram(self.id) };
        }
    }
}

fn read_source(path: &Path) -> Result<CString, RenderError> {
    let source = std::fs::read_to_string(path).map_err(|e| RenderError::ShaderCompile {
        path: path.display().to_string(),
        log: e.to_string(),
    })?;
    CString::new(source).map_err(|e| RenderError::ShaderCompile {
        path: path.display().to_string(),
        log: e.to_string(),
    })
}

fn compile(kind: GLenum, source: &CString, path: &Path) -> Result<GLuint, RenderError> {
    let shader = unsafe {
        let shader = gl::CreateShader(kind);
        gl::ShaderSource(shader, 1, &source.as_ptr(), std::ptr::null());
        gl::CompileShader(shader);
        shader
    };

    let mut success = GLint::from(gl::FALSE);
    unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
    if success == GLint::from(gl::FALSE) {
        let log = info_log(shader, gl::GetShaderiv, gl::GetShaderInfoLog);
        unsafe { gl::DeleteShader(shader) };
        return Err(RenderError::ShaderCompile {
            path: path.display().to_string(),
            log,
        });
    }
    Ok(shader)
}

type GetIv = unsafe fn(GLuint, GLenum, *mut GLint);
type GetInfoLog = unsafe fn(GLuint, i32, *mut i32, *mut GLchar);

fn info_log(object: GLuint, get_iv: GetIv, get_log: GetInfoLog) -> String {
    let mut length: GLint = 0;
    unsafe { get_iv(object, gl::INFO_LOG_LENGTH, &mut length) };
    let mut buffer = vec![0_u8; usize::try_from(length).unwrap_or(0).max(1)];
    let mut written: GLint = 0;
    unsafe {
        get_log(
            object,
            GLint::try_from(buffer.len()).unwrap_or(GLint::MAX),
            &mut written,
            buffer.as_mut_ptr().cast::<GLchar>(),
        );
    }
    buffer.truncate(usize::try_from(written).unwrap_or(0));
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}
