//! Firmware for the smart car's Arduino Uno.
//!
//! The decision logic lives in `smartcar_core`. This crate only binds it to the
//! board: the rangers, the two analog probes, the H-bridge and its PWM enables,
//! the pump relay, a millisecond clock and the serial log.
//!
//! It is based off of the [Arduino Hal](https://github.com/Rahix/avr-hal) base framework
//! which provides the linker scripts and the avrdude/ravedude integration used by
//! `cargo run`.
//!
//! NOTE: This crate and its binary shoud only ever be built in release mode.
//!
//! Pin map:
//! * `D2`/`D3` front HC-SR04 trigger/echo
//! * `D4`/`D5` side HC-SR04 trigger/echo
//! * `D6`/`D7` left motor direction, `D8`/`D9` right motor direction
//! * `D10` left enable (OC1B), `D11` right enable (OC2A)
//! * `D12` water pump
//! * `A0` LM35 temperature, `A1` MQ-2 gas

#![no_std]
#![feature(abi_avr_interrupt)]

/// Baud rate of the diagnostic serial line
pub const SERIAL_BAUD: u32 = 9600;
/// An echo that has not started and finished within this many microseconds is reported as missing
pub const ECHO_TIMEOUT_US: u32 = 30_000;

/// Millisecond and microsecond clock on timer 0
pub mod clock;

/// 8 bit PWM on the two H-bridge enable pins
pub mod pwm;

/// HC-SR04 ultrasonic ranger
pub mod ultrasonic;

/// The board's implementation of the core's sensor port
pub mod board;

/// Event lines over the serial port
pub mod serial_log;
