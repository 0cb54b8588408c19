mod cli;
mod config;
mod dispatch;
mod error;
mod renderer;
mod state;
mod utils;

use std::{io, thread};

use clap::Parser;
use eyre::{Result, WrapErr};
use libpreserve::{Animator, FrameRenderer, FrameScheduler};
use wayland_client::{EventQueue, backend::WaylandError};

use cli::Cli;
use config::{Config, Settings, get_expanded_path};
use state::PreserveState;

pub fn main() {
    let cli = Cli::parse();

    let config = cli
        .config
        .as_deref()
        .map(get_expanded_path)
        .or_else(Config::default_path)
        .and_then(|path| Config::load(&path))
        .unwrap_or_default();
    let settings = Settings::resolve(&cli, config);

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level)
        .with_writer(std::io::stderr)
        .init();

    // A failed setup is reported but still exits with status 0.
    if let Err(err) = run(&settings) {
        tracing::error!("{err:?}");
    }
}

fn run(settings: &Settings) -> Result<()> {
    tracing::debug!(?settings, "starting");

    let (mut state, mut event_queue) =
        PreserveState::new(settings).wrap_err("failed to set up the EGL window")?;
    state
        .init_program()
        .wrap_err("Could not set up graphics")?;
    state.enable_preserve();

    let mut scheduler = FrameScheduler::new(
        Animator::default(),
        rand::thread_rng(),
        settings.clear_interval,
    );
    state.clear(scheduler.initial_clear().color);

    println!("Starting the EGL buffer preserve demo, press <ESC> to quit.");

    while state.running {
        pump_events(&mut event_queue, &mut state)?;

        // A dropped swap costs one frame, the animation carries on.
        let pace = || thread::sleep(settings.frame_delay);
        if let Err(err) = scheduler.run_frame(&mut state, pace) {
            tracing::error!("eglSwapBuffers failed: {err}");
        }
    }
    state.deinit()?;

    Ok(())
}

/// Reads whatever the compositor has sent without blocking and dispatches it.
fn pump_events(
    event_queue: &mut EventQueue<PreserveState>,
    state: &mut PreserveState,
) -> Result<(), error::PreserveEglError> {
    event_queue.flush()?;
    if let Some(guard) = event_queue.prepare_read() {
        match guard.read() {
            Ok(_) => {}
            Err(WaylandError::Io(err)) if err.kind() == io::ErrorKind::WouldBlock => {}
            Err(err) => return Err(err.into()),
        }
    }
    event_queue.dispatch_pending(state)?;
    Ok(())
}
