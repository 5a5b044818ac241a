//! Application core — pure domain logic, zero I/O.
//!
//! [`service::MonitorService`] runs the monitor cycle.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
