//! pixelpet-core: a virtual pet simulation kept consistent across
//! independently refreshed presentation surfaces.
//!
//! - `simulation` / `engine`: the authoritative state machine and its
//!   single-queue driver (user actions, animation, decay, overlay timers).
//! - `store`: the shared snapshot mirror other processes read.
//! - `timeline`: precomputed entries for surfaces without a live clock.
//! - `overlay`: lifecycle of the push-updated live overlay.
//! - `sprites`: the frame/palette data handed to the drawing layer.

pub mod attribute;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod overlay;
pub mod scheduler;
pub mod simulation;
pub mod snapshot;
pub mod sprites;
pub mod store;
pub mod timeline;
pub mod types;
pub mod variant;
