use gl::types::*;
use std::mem;
use std::ptr;

/// One entry of a vertex layout: which attribute location reads how many
/// floats, starting at which float offset inside a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: GLuint,
    pub components: GLint,
    pub offset: usize,
}

/// Static description of how a flat `&[f32]` maps to shader attributes.
///
/// Fixed per demo, never recomputed. Offsets and stride are in floats;
/// conversion to bytes happens at upload time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    stride: usize,
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// `vec3 position` at location 0.
    pub fn position() -> Self {
        Self {
            stride: 3,
            attributes: vec![VertexAttribute {
                location: 0,
                components: 3,
                offset: 0,
            }],
        }
    }

    /// `vec3 position` + `vec3 color` at locations 0 and 1.
    pub fn position_color() -> Self {
        Self {
            stride: 6,
            attributes: vec![
                VertexAttribute {
                    location: 0,
                    components: 3,
                    offset: 0,
                },
                VertexAttribute {
                    location: 1,
                    components: 3,
                    offset: 3,
                },
            ],
        }
    }

    /// `vec3 position` + `vec3 color` + `vec2 texcoord` at locations 0..2.
    pub fn position_color_texcoord() -> Self {
        Self {
            stride: 8,
            attributes: vec![
                VertexAttribute {
                    location: 0,
                    components: 3,
                    offset: 0,
                },
                VertexAttribute {
                    location: 1,
                    components: 3,
                    offset: 3,
                },
                VertexAttribute {
                    location: 2,
                    components: 2,
                    offset: 6,
                },
            ],
        }
    }

    /// Floats per vertex.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }
}

/// GPU-side mesh: a vertex array object plus the buffers backing it.
pub struct Mesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: Option<GLuint>,
    count: GLsizei,
}

impl Mesh {
    /// Uploads vertex data (and optional indices) and records the attribute
    /// layout into a fresh VAO.
    ///
    /// Vertex data length must be a whole number of vertices for `layout`.
    pub fn upload(vertices: &[f32], indices: Option<&[u32]>, layout: &VertexLayout) -> Self {
        debug_assert_eq!(vertices.len() % layout.stride(), 0);

        let mut vao = 0;
        let mut vbo = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            let bytes: &[u8] = bytemuck::cast_slice(vertices);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }

        let ebo = indices.map(|indices| {
            let mut ebo = 0;
            unsafe {
                gl::GenBuffers(1, &mut ebo);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                let bytes: &[u8] = bytemuck::cast_slice(indices);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    bytes.len() as GLsizeiptr,
                    bytes.as_ptr() as *const _,
                    gl::STATIC_DRAW,
                );
            }
            ebo
        });

        let float_size = mem::size_of::<f32>();
        for attr in layout.attributes() {
            unsafe {
                gl::VertexAttribPointer(
                    attr.location,
                    attr.components,
                    gl::FLOAT,
                    gl::FALSE,
                    (layout.stride() * float_size) as GLsizei,
                    (attr.offset * float_size) as *const _,
                );
                gl::EnableVertexAttribArray(attr.location);
            }
        }

        // The EBO binding is recorded in the VAO, so only the VAO itself is
        // unbound here.
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        let count = match indices {
            Some(indices) => indices.len(),
            None => vertices.len() / layout.stride(),
        };

        Mesh {
            vao,
            vbo,
            ebo,
            count: count as GLsizei,
        }
    }

    /// Binds the VAO and draws the whole mesh as triangles.
    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            match self.ebo {
                Some(_) => gl::DrawElements(gl::TRIANGLES, self.count, gl::UNSIGNED_INT, ptr::null()),
                None => gl::DrawArrays(gl::TRIANGLES, 0, self.count),
            }
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.count as usize
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            if let Some(ebo) = self.ebo {
                gl::DeleteBuffers(1, &ebo);
            }
        }
    }
}
