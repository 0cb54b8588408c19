use crate::error::{PreserveEglError, Result};
use crate::state::{BUFFER_AGE_EXT, PreserveState};
use crate::utils::{check_gl_error, link_program, load_shader};

use gl::types::{GLint, GLuint};
use libpreserve::{ClearColor, FrameRenderer, Triangle};

const POSITION_ATTRIB: &std::ffi::CStr = c"vPosition";

impl PreserveState {
    pub fn init_program(&mut self) -> Result<()> {
        let vert_shader = load_shader(gl::VERTEX_SHADER, include_str!("./shaders/vert.glsl"))?;
        let frag_shader =
            match load_shader(gl::FRAGMENT_SHADER, include_str!("./shaders/frag.glsl")) {
                Ok(shader) => shader,
                Err(err) => {
                    unsafe { gl::DeleteShader(vert_shader) };
                    return Err(err);
                }
            };

        let linked = link_program(vert_shader, frag_shader);
        unsafe {
            gl::DeleteShader(vert_shader);
            gl::DeleteShader(frag_shader);
        }
        self.gl_program = linked?;

        let location = unsafe { gl::GetAttribLocation(self.gl_program, POSITION_ATTRIB.as_ptr()) };
        check_gl_error("glGetAttribLocation");
        tracing::info!("glGetAttribLocation(\"vPosition\") = {location}");
        self.gl_position_handle = GLuint::try_from(location)
            .map_err(|_| PreserveEglError::GLAttribMissing("vPosition"))?;

        unsafe {
            gl::Viewport(0, 0, self.width as GLint, self.height as GLint);
        }
        check_gl_error("glViewport");

        Ok(())
    }
}

impl FrameRenderer for PreserveState {
    type Error = PreserveEglError;

    fn clear(&mut self, color: ClearColor) {
        let [red, green, blue, alpha] = color.as_array();
        unsafe {
            gl::ClearColor(red, green, blue, alpha);
            gl::Clear(gl::DEPTH_BUFFER_BIT | gl::COLOR_BUFFER_BIT);
        }
        check_gl_error("glClear");
    }

    fn draw_triangle(&mut self, triangle: &Triangle) {
        let vertices = triangle.vertices();
        unsafe {
            gl::UseProgram(self.gl_program);
            check_gl_error("glUseProgram");

            // Client-side array: nothing is bound to GL_ARRAY_BUFFER, and
            // `vertices` outlives the draw call below.
            gl::VertexAttribPointer(
                self.gl_position_handle,
                2,
                gl::FLOAT,
                gl::FALSE,
                0,
                vertices.as_ptr().cast(),
            );
            check_gl_error("glVertexAttribPointer");

            gl::EnableVertexAttribArray(self.gl_position_handle);
            check_gl_error("glEnableVertexAttribArray");

            gl::DrawArrays(gl::TRIANGLES, 0, 3);
            check_gl_error("glDrawArrays");
        }
    }

    fn present(&mut self) -> Result<()> {
        self.egl.swap_buffers(self.egl_display, self.egl_surface)?;
        tracing::trace!("eglSwapBuffers called");
        Ok(())
    }

    fn buffer_age(&self) -> i32 {
        match self
            .egl
            .query_surface(self.egl_display, self.egl_surface, BUFFER_AGE_EXT)
        {
            Ok(age) => age,
            Err(err) => {
                tracing::error!("after eglQuerySurface(EGL_BUFFER_AGE_EXT) eglError {err}");
                0
            }
        }
    }
}
