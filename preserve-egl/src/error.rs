use std::result;
use thiserror::Error;
use wayland_client::{
    ConnectError, DispatchError,
    backend::WaylandError,
    globals::{BindError, GlobalError},
};

pub type Result<T, E = PreserveEglError> = result::Result<T, E>;

#[derive(Error, Debug)]
pub enum PreserveEglError {
    #[error("connect error: {0}")]
    Connect(#[from] ConnectError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("wayland error: {0}")]
    Wayland(#[from] WaylandError),

    #[error("global error: {0}")]
    Global(#[from] GlobalError),

    #[error("{interface} global missing: {source}")]
    GlobalMissing {
        interface: &'static str,
        source: BindError,
    },

    #[error("wayland-egl window creation failed: {0}")]
    EglWindow(#[from] wayland_egl::Error),

    #[error("EGL error: {0}")]
    Egl(#[from] khronos_egl::Error),

    #[error("eglGetDisplay returned EGL_NO_DISPLAY")]
    NoDisplay,

    #[error("no EGL config supports preserved window surfaces for OpenGL ES 2")]
    NoConfig,

    #[error("Shader compilation failed: {0}")]
    GLShaderCompileFailed(String),

    #[error("Failed to create gl program")]
    GLCreateProgramFailed,

    #[error("Failed to link gl program: {0}")]
    GLLinkProgramFailed(String),

    #[error("attribute {0} not found in program")]
    GLAttribMissing(&'static str),
}
