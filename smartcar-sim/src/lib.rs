//! Host side simulator for the smart car.
//!
//! The controller from `smartcar_core` runs unchanged against a simulated arena:
//! [rig] implements the core's hardware traits on top of a shared [world::World],
//! [runner] advances both on a virtual clock inside a tokio task and [telemetry]
//! records every cycle for later inspection.
//!
//! The `smartcar-sim` binary wraps all of this in a command line interface.

/// Arena geometry, the car's motion and the heat and gas fields
pub mod world;
/// Sensor, motor and pump handles backed by the world
pub mod rig;
/// Built-in arenas
pub mod scenario;
/// Event logging
pub mod logger;
/// Cycle records, recordings and summaries
pub mod telemetry;
pub mod runner;
pub mod error;
