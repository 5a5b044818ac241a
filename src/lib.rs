//! RoomWatch firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod pins;
pub mod presentation;
pub mod rooms;
pub mod scheduler;
pub mod sensors;
pub mod shared;

// Hardware-facing modules; the real implementations are guarded by cfg
// attributes inside, with host simulation stubs otherwise.
pub mod adapters;
pub mod drivers;
