// src/watch/mod.rs

//! Change detection by polling.
//!
//! This module is responsible for:
//! - Compiling the watched-tree glob profile (`patterns.rs`).
//! - Walking the watched roots and diffing modification times against
//!   the previous cycle (`poller.rs`).
//! - Driving the serial poll/detect/build loop (`watcher.rs`).
//!
//! It does **not** know how a build works; it only turns filesystem
//! changes into build-cycle triggers. There is deliberately no
//! event-driven backend here: polling keeps the change detection a pure
//! function of `(roots, prior state)`, which is what makes it testable
//! without timers.

pub mod patterns;
pub mod poller;
pub mod watcher;

pub use patterns::{WatchProfile, build_watch_profile};
pub use poller::{ChangeSet, WatchState, poll};
pub use watcher::WatchLoop;
