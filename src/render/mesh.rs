use std::mem;
use std::ptr;

use gl::types::*;

#[rustfmt::skip]
const PYRAMID_INDICES: [u32; 12] = [
    0, 3, 1,
    1, 3, 2,
    2, 3, 0,
    0, 1, 2,
];

/// Static geometry: `xyz` positions and an optional triangle index list.
///
/// An empty `indices` list means the positions are drawn as plain triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    pub fn triangle() -> Self {
        Self::new(
            vec![[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]],
            Vec::new(),
        )
    }

    /// Four-sided pyramid: three base corners and an apex at `(0, 1, 0)`.
    pub fn pyramid() -> Self {
        Self::new(
            vec![
                [-1.0, -1.0, 0.0],
                [0.0, -1.0, 1.0],
                [1.0, -1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            PYRAMID_INDICES.to_vec(),
        )
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn element_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len()
        } else {
            self.positions.len()
        }
    }

    /// Whether every index addresses an existing vertex and the element
    /// count forms whole triangles.
    #[cfg(test)]
    pub fn is_well_formed(&self) -> bool {
        let in_range = self
            .indices
            .iter()
            .all(|&i| (i as usize) < self.positions.len());
        in_range && self.element_count() % 3 == 0
    }
}

/// Vertex array with its buffers, uploaded once with `STATIC_DRAW`.
pub struct GpuMesh {
    vao: GLuint,
    vbo: GLuint,
    ibo: Option<GLuint>,
    count: GLsizei,
}

impl GpuMesh {
    pub fn upload(data: &MeshData) -> Self {
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&data.positions);
        let mut vao = 0;
        let mut vbo = 0;
        let mut ibo = None;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            if data.is_indexed() {
                let index_bytes: &[u8] = bytemuck::cast_slice(&data.indices);
                let mut id = 0;
                gl::GenBuffers(1, &mut id);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    index_bytes.len() as GLsizeiptr,
                    index_bytes.as_ptr() as *const _,
                    gl::STATIC_DRAW,
                );
                ibo = Some(id);
            }

            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertex_bytes.len() as GLsizeiptr,
                vertex_bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            // location 0: tightly packed vec3 position
            gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                (3 * mem::size_of::<f32>()) as GLsizei,
                ptr::null(),
            );
            gl::EnableVertexAttribArray(0);

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
            // The element buffer binding is VAO state; unbind it only after the VAO.
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0);
        }

        log::debug!(
            "Uploaded mesh: {} vertices, {} indices",
            data.positions.len(),
            data.indices.len()
        );

        Self {
            vao,
            vbo,
            ibo,
            count: data.element_count() as GLsizei,
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            match self.ibo {
                Some(ibo) => {
                    gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
                    gl::DrawElements(gl::TRIANGLES, self.count, gl::UNSIGNED_INT, ptr::null());
                }
                None => gl::DrawArrays(gl::TRIANGLES, 0, self.count),
            }
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        unsafe {
            if let Some(ibo) = self.ibo {
                gl::DeleteBuffers(1, &ibo);
            }
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
