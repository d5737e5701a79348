//! Host-side loop for strata games.
//!
//! A host (windowing layer, test harness, headless server) owns one
//! [`GameRunner`] and feeds it wall-clock frame times:
//!
//! ```ignore
//! let mut runner = strata_host::GameRunner::new(MyGame::new())?;
//! loop {
//!     runner.tick(frame_dt);
//!     draw(runner.ctx(), runner.view_uniform());
//! }
//! ```

pub mod runner;

pub use runner::{GameRunner, ZOOM_SPEED};
