//! Vertex array upload

use std::mem::{offset_of, size_of};

use gl::types::{GLsizei, GLsizeiptr, GLuint};

use crate::assets::{MeshData, Vertex};

/// A mesh resident on the GPU
#[derive(Debug)]
pub struct GpuMesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: GLuint,
    count: GLsizei,
    indexed: bool,
}

impl GpuMesh {
    /// Upload interleaved vertices and, when present, indices
    pub fn upload(mesh: &MeshData) -> Self {
        let indexed = !mesh.indices.is_empty();
        let count = GLsizei::try_from(mesh.draw_count()).unwrap_or(GLsizei::MAX);
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&mesh.indices);
        let stride = size_of::<Vertex>() as GLsizei;

        let (mut vao, mut vbo, mut ebo) = (0, 0, 0);
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::BindVertexArray(vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertex_bytes.len() as GLsizeiptr,
                vertex_bytes.as_ptr().cast(),
                gl::STATIC_DRAW,
            );

            if indexed {
                gl::GenBuffers(1, &mut ebo);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    index_bytes.len() as GLsizeiptr,
                    index_bytes.as_ptr().cast(),
                    gl::STATIC_DRAW,
                );
            }

            let attributes = [
                (0, 3, offset_of!(Vertex, position)),
                (1, 3, offset_of!(Vertex, normal)),
                (2, 2, offset_of!(Vertex, tex_coords)),
            ];
            for (location, components, offset) in attributes {
                gl::EnableVertexAttribArray(location);
                gl::VertexAttribPointer(
                    location,
                    components,
                    gl::FLOAT,
                    gl::FALSE,
                    stride,
                    offset as *const _,
                );
            }

            gl::BindVertexArray(0);
        }

        Self {
            vao,
            vbo,
            ebo,
            count,
            indexed,
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            if self.indexed {
                gl::DrawElements(gl::TRIANGLES, self.count, gl::UNSIGNED_INT, std::ptr::null());
            } else {
                gl::DrawArrays(gl::TRIANGLES, 0, self.count);
            }
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            if self.indexed {
                gl::DeleteBuffers(1, &self.ebo);
            }
        }
    }
}
