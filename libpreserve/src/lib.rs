//! `libpreserve` holds the frame logic of the EGL buffer-preserve demo: a
//! triangle that bounces around a fixed rectangle and a scheduler that wipes
//! the background every few frames.
//!
//! Nothing here talks to a GPU. Rendering goes through the [`FrameRenderer`]
//! trait so the animation can be driven by any backend, or by a fake in tests.
//!
//! ```
//! use libpreserve::{Animator, FrameScheduler, DEFAULT_CLEAR_INTERVAL};
//!
//! let scheduler = FrameScheduler::new(
//!     Animator::default(),
//!     rand::thread_rng(),
//!     DEFAULT_CLEAR_INTERVAL,
//! );
//! assert_eq!(scheduler.frame_count(), 0);
//! ```

pub mod animator;
pub mod color;
pub mod region;
pub mod scheduler;

pub use crate::animator::{Animator, Bounds, Direction, Triangle};
pub use crate::color::ClearColor;
pub use crate::region::DamageRegion;
pub use crate::scheduler::{ClearEvent, DEFAULT_CLEAR_INTERVAL, FrameRenderer, FrameScheduler};
