//! GL renderer for the displaced wireframe grid
//!
//! Uploads a [`WireframeMesh`] as one interleaved vertex buffer plus an index
//! buffer and draws it with the noise/wireframe/fog program in `shaders/`.

use glow::*;
use grid::{Grid, WireframeMesh};

use crate::error::RenderError;
use crate::frame::{DrawParams, FrameMatrices, GridStyle, aspect_ratio};
use crate::shader_utils::create_program;

pub const VERTEX_SHADER_SOURCE: &str = include_str!("shaders/grid.vert");
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("shaders/grid.frag");

/// position (3) + uv (2) + barycentric (2) + normal (3)
pub const FLOATS_PER_VERTEX: usize = 10;

/// Attribute locations, matching the `layout(location = N)` qualifiers
pub const POSITION_LOCATION: u32 = 0;
pub const UV_LOCATION: u32 = 1;
pub const BARYCENTRIC_LOCATION: u32 = 2;
pub const NORMAL_LOCATION: u32 = 3;

/// Interleave mesh attributes in the layout the vertex shader expects
pub fn interleave(mesh: &WireframeMesh) -> Vec<f32> {
    let mut data = Vec::with_capacity(mesh.corner_count() * FLOATS_PER_VERTEX);
    for i in 0..mesh.corner_count() {
        data.extend_from_slice(&mesh.positions[i]);
        data.extend_from_slice(&mesh.uvs[i]);
        data.extend_from_slice(&mesh.barycentric[i]);
        data.extend_from_slice(&mesh.normals[i]);
    }
    data
}

/// Compiled mesh ready for GL rendering
struct GlMesh {
    vao: VertexArray,
    vbo: Buffer,
    ebo: Buffer,
    index_count: i32,
}

/// Uniform locations of the grid program
struct GridUniforms {
    projection: Option<UniformLocation>,
    view: Option<UniformLocation>,
    rotate: Option<UniformLocation>,
    time: Option<UniformLocation>,
    eye: Option<UniformLocation>,
    displacement: Option<UniformLocation>,
    noise_offset: Option<UniformLocation>,
    background_color: Option<UniformLocation>,
    mesh_color: Option<UniformLocation>,
    line_thickness: Option<UniformLocation>,
    line_feather: Option<UniformLocation>,
    same_as_background: Option<UniformLocation>,
    inverse: Option<UniformLocation>,
    fog_distance: Option<UniformLocation>,
}

impl GridUniforms {
    unsafe fn locate(gl: &Context, program: Program) -> Self {
        unsafe {
            let get = |name: &str| gl.get_uniform_location(program, name);
            Self {
                projection: get("uProjection"),
                view: get("uView"),
                rotate: get("uRotate"),
                time: get("uTime"),
                eye: get("uEye"),
                displacement: get("uDisplacement"),
                noise_offset: get("uNoiseOffset"),
                background_color: get("uBackgroundColor"),
                mesh_color: get("uMeshColor"),
                line_thickness: get("uLineThickness"),
                line_feather: get("uLineFeather"),
                same_as_background: get("uIsSameAsBackgroundColor"),
                inverse: get("uInverse"),
                fog_distance: get("uFogDist"),
            }
        }
    }
}

/// Draws a single grid with the displacement/wireframe program
#[derive(Default)]
pub struct GridRenderer {
    program: Option<Program>,
    uniforms: Option<GridUniforms>,
    mesh: Option<GlMesh>,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the grid program
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn init_gl(&mut self, gl: &Context) -> Result<(), RenderError> {
        unsafe {
            let program = create_program(gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)?;
            self.uniforms = Some(GridUniforms::locate(gl, program));
            self.program = Some(program);
            tracing::info!("Grid program compiled");
            Ok(())
        }
    }

    /// Upload `grid`, replacing any previously uploaded mesh
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn upload(&mut self, gl: &Context, grid: &Grid) -> Result<(), RenderError> {
        unsafe {
            let wireframe = WireframeMesh::from_grid(grid);
            let vertex_data = interleave(&wireframe);
            let stride = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32;
            let float_size = std::mem::size_of::<f32>() as i32;

            let vao = gl
                .create_vertex_array()
                .map_err(|e| RenderError::resource("VAO", e))?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl
                .create_buffer()
                .map_err(|e| RenderError::resource("VBO", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                ARRAY_BUFFER,
                bytemuck::cast_slice(&vertex_data),
                STATIC_DRAW,
            );

            // (location, components, offset in floats)
            for (location, size, offset) in [
                (POSITION_LOCATION, 3, 0),
                (UV_LOCATION, 2, 3),
                (BARYCENTRIC_LOCATION, 2, 5),
                (NORMAL_LOCATION, 3, 7),
            ] {
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(location, size, FLOAT, false, stride, offset * float_size);
            }

            let ebo = gl
                .create_buffer()
                .map_err(|e| RenderError::resource("EBO", e))?;
            gl.bind_buffer(ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&wireframe.indices),
                STATIC_DRAW,
            );

            gl.bind_vertex_array(None);

            if let Some(old) = self.mesh.take() {
                delete_mesh(gl, old);
            }
            self.mesh = Some(GlMesh {
                vao,
                vbo,
                ebo,
                index_count: wireframe.indices.len() as i32,
            });

            tracing::info!(
                "Uploaded {}x{} grid ({} corners, {} triangles)",
                grid.width_segments(),
                grid.height_segments(),
                wireframe.corner_count(),
                wireframe.triangle_count()
            );
            Ok(())
        }
    }

    /// Number of indices in the uploaded mesh
    pub fn index_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, |m| m.index_count as usize)
    }

    /// Clear color and depth to the background color
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn clear(gl: &Context, params: &DrawParams) {
        unsafe {
            // egui leaves scissoring on, which would clip the clear
            gl.disable(SCISSOR_TEST);
            let bg = params.background_color;
            gl.clear_color(bg.x, bg.y, bg.z, 1.0);
            gl.clear_depth_f32(1.0);
            gl.clear(COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT);
        }
    }

    /// Draw the uploaded grid into the bound framebuffer
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn render(
        &self,
        gl: &Context,
        params: &DrawParams,
        style: &GridStyle,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        unsafe {
            let (Some(program), Some(uniforms), Some(mesh)) =
                (self.program, self.uniforms.as_ref(), self.mesh.as_ref())
            else {
                return Err(RenderError::NotInitialized);
            };

            let matrices = FrameMatrices::new(params.eye, aspect_ratio(width, height));

            gl.viewport(0, 0, width as i32, height as i32);
            gl.enable(DEPTH_TEST);
            gl.depth_func(LESS);
            gl.disable(CULL_FACE);
            gl.disable(BLEND);
            gl.use_program(Some(program));

            gl.uniform_matrix_4_f32_slice(
                uniforms.projection.as_ref(),
                false,
                &matrices.projection.to_cols_array(),
            );
            gl.uniform_matrix_4_f32_slice(
                uniforms.view.as_ref(),
                false,
                &matrices.view.to_cols_array(),
            );
            gl.uniform_matrix_4_f32_slice(
                uniforms.rotate.as_ref(),
                false,
                &matrices.rotate.to_cols_array(),
            );
            gl.uniform_1_f32(uniforms.time.as_ref(), params.time);
            gl.uniform_3_f32(
                uniforms.eye.as_ref(),
                params.eye.x,
                params.eye.y,
                params.eye.z,
            );
            gl.uniform_1_f32(uniforms.displacement.as_ref(), params.displacement);
            gl.uniform_1_f32(uniforms.noise_offset.as_ref(), style.noise_offset);

            let bg = params.background_color;
            gl.uniform_3_f32(uniforms.background_color.as_ref(), bg.x, bg.y, bg.z);
            let mesh_color = params.mesh_color;
            gl.uniform_3_f32(
                uniforms.mesh_color.as_ref(),
                mesh_color.x,
                mesh_color.y,
                mesh_color.z,
            );
            gl.uniform_1_f32(uniforms.line_thickness.as_ref(), params.line_thickness);
            gl.uniform_1_f32(uniforms.line_feather.as_ref(), style.line_feather);
            gl.uniform_1_i32(
                uniforms.same_as_background.as_ref(),
                params.same_as_background as i32,
            );
            gl.uniform_1_i32(uniforms.inverse.as_ref(), params.inverse as i32);
            gl.uniform_2_f32(
                uniforms.fog_distance.as_ref(),
                style.fog_distance.x,
                style.fog_distance.y,
            );

            gl.bind_vertex_array(Some(mesh.vao));
            gl.draw_elements(TRIANGLES, mesh.index_count, UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);
            gl.use_program(None);

            Ok(())
        }
    }

    /// Release the program and mesh
    ///
    /// # Safety
    ///
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn destroy_gl(&mut self, gl: &Context) {
        unsafe {
            if let Some(mesh) = self.mesh.take() {
                delete_mesh(gl, mesh);
            }
            if let Some(program) = self.program.take() {
                gl.delete_program(program);
            }
            self.uniforms = None;
        }
    }
}

unsafe fn delete_mesh(gl: &Context, mesh: GlMesh) {
    unsafe {
        gl.delete_vertex_array(mesh.vao);
        gl.delete_buffer(mesh.vbo);
        gl.delete_buffer(mesh.ebo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleave_layout() {
        let grid = Grid::new(2.0, 2.0, 1, 1).unwrap();
        let mesh = WireframeMesh::from_grid(&grid);
        let data = interleave(&mesh);

        assert_eq!(data.len(), 6 * FLOATS_PER_VERTEX);

        // First corner is vertex 0: (-1, 1, 0), uv (0, 1), bary (0, 0)
        #[rustfmt::skip]
        let first = [
            -1.0, 1.0, 0.0,
            0.0, 1.0,
            0.0, 0.0,
            0.0, 0.0, 1.0,
        ];
        assert_eq!(&data[..FLOATS_PER_VERTEX], &first);

        // Second corner is vertex 2 with bary (1, 0)
        let second = &data[FLOATS_PER_VERTEX..2 * FLOATS_PER_VERTEX];
        assert_eq!(&second[..3], &[1.0, 1.0, 0.0]);
        assert_eq!(&second[5..7], &[1.0, 0.0]);
    }

    #[test]
    fn test_new_renderer_has_no_mesh() {
        assert_eq!(GridRenderer::new().index_count(), 0);
    }
}
