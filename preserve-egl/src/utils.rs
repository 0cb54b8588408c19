use crate::error::{PreserveEglError, Result};
use gl::types::{GLchar, GLenum, GLint, GLuint};
use std::{ffi::CString, ptr};

/// Drains the GL error queue, logging every pending error against `op`.
pub fn check_gl_error(op: &str) {
    loop {
        let error = unsafe { gl::GetError() };
        if error == gl::NO_ERROR {
            break;
        }
        tracing::error!("after {op}() glError (0x{error:x})");
    }
}

pub fn load_shader(shader_type: GLenum, src: &str) -> Result<GLuint> {
    let src_c_str = CString::new(src)
        .map_err(|_| PreserveEglError::GLShaderCompileFailed("nul byte in source".into()))?;

    unsafe {
        let shader: GLuint = gl::CreateShader(shader_type);

        if shader == 0 {
            return Err(PreserveEglError::GLShaderCompileFailed(format!(
                "glCreateShader({shader_type:#x}) returned 0"
            )));
        }

        gl::ShaderSource(shader, 1, &src_c_str.as_ptr(), ptr::null());
        gl::CompileShader(shader);

        let mut status: GLint = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        if status == 0 {
            let log = shader_info_log(shader);
            gl::DeleteShader(shader);
            tracing::error!("Could not compile shader {shader_type:#x}:\n{log}");
            return Err(PreserveEglError::GLShaderCompileFailed(log));
        }

        tracing::debug!("compiled shader {shader_type:#x}");
        Ok(shader)
    }
}

pub fn link_program(vert_shader: GLuint, frag_shader: GLuint) -> Result<GLuint> {
    let program = unsafe { gl::CreateProgram() };
    if program == 0 {
        tracing::error!("glCreateProgram failed!");
        return Err(PreserveEglError::GLCreateProgramFailed);
    }

    unsafe {
        gl::AttachShader(program, vert_shader);
        check_gl_error("glAttachShader");
        gl::AttachShader(program, frag_shader);
        check_gl_error("glAttachShader");
        gl::LinkProgram(program);
    }

    let mut linked: GLint = 0;
    unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut linked) };

    if linked == 0 {
        let log = program_info_log(program);
        unsafe { gl::DeleteProgram(program) };
        tracing::error!("Could not link program:\n{log}");
        return Err(PreserveEglError::GLLinkProgramFailed(log));
    }

    tracing::info!("Successfully linked the program!");
    Ok(program)
}

fn shader_info_log(shader: GLuint) -> String {
    let mut len: GLint = 0;
    unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
    read_info_log(len, |capacity, written, buf| unsafe {
        gl::GetShaderInfoLog(shader, capacity, written, buf)
    })
}

fn program_info_log(program: GLuint) -> String {
    let mut len: GLint = 0;
    unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
    read_info_log(len, |capacity, written, buf| unsafe {
        gl::GetProgramInfoLog(program, capacity, written, buf)
    })
}

fn read_info_log(len: GLint, fetch: impl FnOnce(GLint, *mut GLint, *mut GLchar)) -> String {
    if len <= 0 {
        return String::new();
    }

    let mut buf = vec![0u8; len as usize];
    let mut written: GLint = 0;
    fetch(len, &mut written as *mut GLint, buf.as_mut_ptr().cast());
    buf.truncate(written.clamp(0, len) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}
