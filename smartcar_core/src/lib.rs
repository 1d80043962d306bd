//! Decision logic of the smart car, shared by the Uno firmware (`smartcar-internal`)
//! and the host simulator (`smartcar-sim`).
//!
//! One cycle reads a [sensors::SensorSnapshot], checks it for heat and gas with
//! [hazard::evaluate_hazard], and either stops the car or asks
//! [navigation::decide_movement] where to go. The result ends up on the two motor
//! channels of a [drive::DriveTrain]. [control::Controller] strings these together
//! and reports what happened as [event::Event]s.
//!
//! The crate knows nothing about pins or clocks. Platforms implement
//! [sensors::SensorPort], [drive::MotorChannel], [drive::Pump] and [event::EventSink]
//! and feed the controller a millisecond timestamp.

#![cfg_attr(not(test), no_std)]

/// Thresholds, hold durations and motor duty
pub mod config;

/// Raw sensor access and the conversions to centimeters and degrees
pub mod sensors;

/// Heat and gas checks
pub mod hazard;

/// Obstacle avoidance rules
pub mod navigation;

/// Motor channels, H-bridge pins and the water pump
pub mod drive;

/// Diagnostic events and the sink they are written to
pub mod event;

/// The control loop state machine
pub mod control;
