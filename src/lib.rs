//! The rules engine behind a Minesweeper game.
//!
//! The purpose of this crate is to keep everything that decides how a Minesweeper session plays out in one place: board generation, mine placement, adjacency counting, reveal propagation (flood fill and chording), flags, win/lose detection and the game clock. Frontends only bother writing the code for the UI, sound playback and input, and talk to the engine through a [`GameController`][controller].
//!
//! The controller is single-threaded and synchronous: every reveal or flag completes before the call returns and is published to observers as a single batch. The only recurring activity, the clock tick, only reads the time and publishes it. Timing and sound are injected through the [`Scheduler`][scheduler], [`Clock`][clock] and [`AudioService`][audio] traits, which keeps games deterministic in tests.
//!
//! # Feature gates
//! - `serialization` — enable support for serialization (**enabled by default**, disable to speed up compilation)
//!
//!   Enables the dependency on `serde` and its derive macros, which allows one to send boards and game state to a frontend running elsewhere, or to load difficulty presets from a configuration file. See the `serde` crate for more.
//!
//! # Testing
//! The [`testing`](testing/index.html) module holds a virtual-time scheduler which also serves as the game clock, so games can be replayed deterministically in tests.
//!
//! # Logging
//! The crate logs through the `log` facade and never installs a logger itself: game setup and mine placement at `debug`, reveal batches at `trace`, game endings at `info` and sound playback failures at `warn`.
//!
//! [controller]: struct.GameController.html "GameController — runs one Minesweeper game at a time"
//! [scheduler]: trait.Scheduler.html "Scheduler — runs deferred and recurring tasks"
//! [clock]: trait.Clock.html "Clock — a source of monotonic time"
//! [audio]: trait.AudioService.html "AudioService — plays sound cues for the game"

#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod audio;
pub use audio::*;
mod board;
pub use board::*;
mod controller;
pub use controller::*;
mod difficulty;
pub use difficulty::*;
mod error;
pub use error::*;
pub mod iter;
pub use iter::*;
mod reveal;
pub use reveal::*;
mod schedule;
pub use schedule::*;
mod state;
pub use state::*;
mod store;
pub use store::*;
pub mod testing;
mod timer;
pub use timer::*;
mod tile;
pub use tile::*;
