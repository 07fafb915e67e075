//! A framework-neutral controller for the `vs-window` crate.
//!
//! `vs-window` is UI-agnostic and only does the window math. This crate owns the per-container
//! state a host needs around it:
//!
//! - Change detection (a render effect is produced only when the materialized window changes)
//! - Coalescing of high-frequency scroll/resize events into one update per frame
//! - The autosize probe and its retry while the container is not laid out yet
//! - Exit/enter marks around list ↔ tile layout switches
//!
//! Time is whatever the host passes to [`ScrollWindowController::tick`]; nothing here spawns
//! timers or threads.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod coalesce;
mod controller;
mod effect;
mod timer;


pub use coalesce::Coalescer;
pub use controller::{ControllerState, FALLBACK_ELEMENT_SIZE, ScrollWindowController};
pub use effect::{PlacedItem, RenderEffect, RenderReason};
pub use timer::{Deadline, RetryTask};
