use std::num::NonZeroU32;

use rand::Rng;

use crate::{
    animator::{Animator, Triangle},
    color::ClearColor,
};

/// Frames drawn between two background clears.
pub const DEFAULT_CLEAR_INTERVAL: NonZeroU32 = NonZeroU32::new(20).unwrap();

/// Whatever puts pixels on screen. [`FrameScheduler::tick`] only draws through
/// it, [`FrameScheduler::run_frame`] drives a whole frame.
pub trait FrameRenderer {
    type Error;

    /// Clears the whole frame buffer to `color`.
    fn clear(&mut self, color: ClearColor);

    /// Draws the triangle on top of whatever the back buffer holds.
    fn draw_triangle(&mut self, triangle: &Triangle);

    /// Makes the frame drawn so far visible.
    fn present(&mut self) -> Result<(), Self::Error>;

    /// Age of the current back buffer as reported by the driver, `0` when its
    /// content is undefined.
    fn buffer_age(&self) -> i32;
}

/// Emitted on the frame where the background has to be wiped, after
/// presenting and before the next tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearEvent {
    pub color: ClearColor,
}

/// Drives the animator one frame at a time and decides when the background is
/// cleared.
#[derive(Debug)]
pub struct FrameScheduler<R> {
    animator: Animator,
    rng: R,
    frame_count: u32,
    clear_interval: NonZeroU32,
}

impl<R: Rng> FrameScheduler<R> {
    pub fn new(animator: Animator, rng: R, clear_interval: NonZeroU32) -> Self {
        Self {
            animator,
            rng,
            frame_count: 0,
            clear_interval,
        }
    }

    /// Color for the clear performed once before the first frame.
    pub fn initial_clear(&self) -> ClearEvent {
        ClearEvent {
            color: ClearColor::INITIAL,
        }
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Frames drawn since the last clear.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn clear_interval(&self) -> NonZeroU32 {
        self.clear_interval
    }

    /// Runs one frame: moves the triangle, draws it, and reports whether the
    /// background is due for a clear.
    pub fn tick<F: FrameRenderer>(&mut self, renderer: &mut F) -> Option<ClearEvent> {
        self.frame_count += 1;
        self.animator.step();
        renderer.draw_triangle(self.animator.triangle());

        if self.frame_count < self.clear_interval.get() {
            return None;
        }

        self.frame_count = 0;
        let color = ClearColor::random(&mut self.rng);
        tracing::debug!(?color, "background clear due");
        Some(ClearEvent { color })
    }

    /// Runs a whole frame against `renderer`: logs the buffer age, ticks,
    /// presents, calls `pace`, then applies the clear if one is due.
    ///
    /// Pacing and the clear happen even when presenting fails, so the
    /// animation keeps its rhythm across dropped swaps. The present error is
    /// handed back after the clear.
    pub fn run_frame<F: FrameRenderer>(
        &mut self,
        renderer: &mut F,
        pace: impl FnOnce(),
    ) -> Result<Option<ClearEvent>, F::Error> {
        let buffer_age = renderer.buffer_age();
        tracing::info!("Query buffer_age: {buffer_age}");

        let clear = self.tick(renderer);
        let presented = renderer.present();
        pace();

        if let Some(ClearEvent { color }) = clear {
            renderer.clear(color);
        }
        presented.map(|()| clear)
    }
}
