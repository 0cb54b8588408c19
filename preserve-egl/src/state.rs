use crate::config::Settings;
use crate::error::{PreserveEglError, Result};

use gl::types::{GLint, GLuint};
use khronos_egl as egl;
use libpreserve::DamageRegion;
use std::ffi::c_void;
use wayland_client::globals::registry_queue_init;
use wayland_client::protocol::wl_seat;
use wayland_client::{
    Connection, EventQueue, Proxy,
    protocol::{wl_compositor, wl_surface::WlSurface},
};
use wayland_egl::WlEglSurface;
use wayland_protocols::xdg::shell::client::{xdg_surface, xdg_toplevel, xdg_wm_base};

/// `EGL_BUFFER_AGE_EXT`, not exported by khronos-egl.
pub const BUFFER_AGE_EXT: egl::Int = 0x313D;

pub struct PreserveState {
    pub width: i32,
    pub height: i32,
    pub running: bool,

    pub wl_surface: WlSurface,
    pub xdg_surface: xdg_surface::XdgSurface,
    pub xdg_toplevel: xdg_toplevel::XdgToplevel,

    pub egl: egl::Instance<egl::Static>,
    pub egl_window: WlEglSurface,
    pub egl_display: egl::Display,
    pub egl_surface: egl::Surface,
    pub egl_context: egl::Context,

    pub gl_program: GLuint,
    pub gl_position_handle: GLuint,
}

impl PreserveState {
    #[tracing::instrument(skip_all)]
    pub fn new(settings: &Settings) -> Result<(Self, EventQueue<Self>)> {
        let server_connection = Connection::connect_to_env()?;
        let (globals, event_queue) = registry_queue_init::<Self>(&server_connection)?;
        let qhandle = event_queue.handle();

        let compositor = globals
            .bind::<wl_compositor::WlCompositor, _, _>(&qhandle, 3..=3, ())
            .map_err(|source| PreserveEglError::GlobalMissing {
                interface: "wl_compositor",
                source,
            })?;
        let wl_surface = compositor.create_surface(&qhandle, ());

        // Keyboard input is only used for <ESC>; run without it on seatless setups.
        if let Err(err) = globals.bind::<wl_seat::WlSeat, _, _>(&qhandle, 1..=1, ()) {
            tracing::warn!("no wl_seat available, <ESC> will not quit: {err}");
        }

        let wm_base = globals
            .bind::<xdg_wm_base::XdgWmBase, _, _>(&qhandle, 2..=6, ())
            .map_err(|source| PreserveEglError::GlobalMissing {
                interface: "xdg_wm_base",
                source,
            })?;
        let xdg_surface = wm_base.get_xdg_surface(&wl_surface, &qhandle, ());

        let xdg_toplevel = xdg_surface.get_toplevel(&qhandle, ());
        xdg_toplevel.set_title(settings.title.clone());
        wl_surface.commit();

        // Init gl
        gl_loader::init_gl();
        gl::load_with(|s| gl_loader::get_proc_address(s) as *const _);

        let egl_window = WlEglSurface::new(wl_surface.id(), settings.width, settings.height)?;

        let egl = egl::Instance::new(egl::Static);
        let egl_display = unsafe {
            egl.get_display(server_connection.display().id().as_ptr() as *mut c_void)
        }
        .ok_or(PreserveEglError::NoDisplay)?;

        let (major, minor) = egl.initialize(egl_display)?;
        tracing::info!("EGL version {major}.{minor}");

        let attributes = [
            egl::SURFACE_TYPE,
            egl::WINDOW_BIT | egl::SWAP_BEHAVIOR_PRESERVED_BIT,
            egl::RENDERABLE_TYPE,
            egl::OPENGL_ES2_BIT,
            egl::RED_SIZE,
            8,
            egl::GREEN_SIZE,
            8,
            egl::BLUE_SIZE,
            8,
            egl::NONE,
        ];

        let config = egl
            .choose_first_config(egl_display, &attributes)?
            .ok_or(PreserveEglError::NoConfig)?;
        let egl_surface = unsafe {
            egl.create_window_surface(
                egl_display,
                config,
                egl_window.ptr() as egl::NativeWindowType,
                None,
            )?
        };

        let context_attributes = [egl::CONTEXT_CLIENT_VERSION, 2, egl::NONE];
        let egl_context = egl.create_context(egl_display, config, None, &context_attributes)?;

        egl.make_current(
            egl_display,
            Some(egl_surface),
            Some(egl_surface),
            Some(egl_context),
        )?;

        let width: egl::Int = egl.query_surface(egl_display, egl_surface, egl::WIDTH)?;
        let height: egl::Int = egl.query_surface(egl_display, egl_surface, egl::HEIGHT)?;

        tracing::info!("Window dimensions: {width} x {height}");
        tracing::info!("Damage Region: {}", DamageRegion::for_surface(width, height));

        Ok((
            Self {
                width,
                height,
                running: true,

                wl_surface,
                xdg_surface,
                xdg_toplevel,

                egl,
                egl_window,
                egl_display,
                egl_surface,
                egl_context,

                gl_program: 0,
                gl_position_handle: 0,
            },
            event_queue,
        ))
    }

    /// Asks the driver to keep the back buffer contents across swaps and
    /// reports what it actually settled on.
    pub fn enable_preserve(&self) {
        if let Err(err) = self.egl.surface_attrib(
            self.egl_display,
            self.egl_surface,
            egl::SWAP_BEHAVIOR,
            egl::BUFFER_PRESERVED,
        ) {
            tracing::error!("after eglSurfaceAttrib() eglError {err}");
        }

        match self.egl.query_surface(
            self.egl_display,
            self.egl_surface,
            egl::SWAP_BEHAVIOR,
        ) {
            Ok(behavior) if behavior == egl::BUFFER_PRESERVED => {
                tracing::info!("swap behavior: EGL_BUFFER_PRESERVED");
            }
            Ok(behavior) => tracing::warn!("swap behavior is 0x{behavior:x}, buffers will not be preserved"),
            Err(err) => tracing::error!("after eglQuerySurface() eglError {err}"),
        }
    }

    /// Tracks a new window size from the compositor.
    pub fn resize(&mut self, width: i32, height: i32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;

        self.egl_window.resize(width, height, 0, 0);

        unsafe {
            gl::Viewport(0, 0, width as GLint, height as GLint);
        }
        self.wl_surface.commit();

        tracing::info!("Window dimensions: {width} x {height}");
        tracing::info!("Damage Region: {}", DamageRegion::for_surface(width, height));
    }

    pub fn deinit(&self) -> Result<()> {
        unsafe {
            gl::DeleteProgram(self.gl_program);
        }

        self.egl.make_current(self.egl_display, None, None, None)?;
        self.egl.destroy_surface(self.egl_display, self.egl_surface)?;
        self.egl.destroy_context(self.egl_display, self.egl_context)?;
        self.egl.terminate(self.egl_display)?;

        self.xdg_toplevel.destroy();
        self.xdg_surface.destroy();
        self.wl_surface.destroy();

        Ok(())
    }
}
