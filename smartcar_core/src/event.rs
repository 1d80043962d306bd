use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    drive::{ActuatorFault, Side},
    navigation::MovementDirective,
    sensors::{Range, RangeSensor, SensorSnapshot},
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level{
    Info,
    Warn,
    Error,
}

/// Everything the control loop reports to its diagnostic stream
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Event{
    Initialized,
    /// One per cycle, after the actuators were written
    Readings(SensorSnapshot),
    HighTemperature(f32),
    HarmfulGas(u16),
    SprayOn,
    SprayOff,
    /// Heat was detected again inside the spray cooldown window
    SpraySuppressed,
    RangerTimeout(RangeSensor),
    Moving(MovementDirective),
    Fault(ActuatorFault),
}

/// Write-only consumer of [Event]s
pub trait EventSink{
    fn record(&mut self, event: Event);
}

/// Discards everything
pub struct NullSink;

impl EventSink for NullSink{
    fn record(&mut self, _event: Event){}
}

impl Event{
    pub fn level(&self) -> Level {
        match self{
            Event::HighTemperature(_) | Event::HarmfulGas(_) | Event::SpraySuppressed | Event::RangerTimeout(_) => Level::Warn,
            Event::Fault(_) => Level::Error,
            _ => Level::Info,
        }
    }

    /// The fixed text of the event, `None` for the readings line which carries numbers
    pub fn message(&self) -> Option<&'static str> {
        let msg = match self{
            Event::Initialized => "Smart Car Control System Initialized",
            Event::Readings(_) => return None,
            Event::HighTemperature(_) => "WARNING: High temperature detected!",
            Event::HarmfulGas(_) => "WARNING: Harmful gas detected!",
            Event::SprayOn => "Activating water spray system",
            Event::SprayOff => "Water spray off",
            Event::SpraySuppressed => "Water spray suppressed (cooldown)",
            Event::RangerTimeout(RangeSensor::Front) => "WARNING: front ranger timed out",
            Event::RangerTimeout(RangeSensor::Side) => "WARNING: side ranger timed out",
            Event::Moving(d) => directive_message(*d),
            Event::Fault(ActuatorFault::Channel(Side::Left)) => "ERROR: left motor channel write failed",
            Event::Fault(ActuatorFault::Channel(Side::Right)) => "ERROR: right motor channel write failed",
            Event::Fault(ActuatorFault::Pump) => "ERROR: pump write failed",
        };
        Some(msg)
    }
}

pub fn directive_message(directive: MovementDirective) -> &'static str {
    match directive{
        MovementDirective::Forward => "Moving forward",
        MovementDirective::Backward => "Moving backward",
        MovementDirective::TurnRight => "Turning right",
        MovementDirective::TurnLeft => "Turning left",
        MovementDirective::Stop => "Car stopped",
    }
}

/// A value rounded half away from zero to two decimals and split into digits,
/// for sinks that cannot format floats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hundredths{
    pub negative: bool,
    pub whole: u32,
    /// 0..=99
    pub fraction: u8,
}

impl Hundredths{
    pub fn new(value: f32) -> Self {
        let scaled = (if value < 0.0 { value * 100.0 - 0.5 } else { value * 100.0 + 0.5 }) as i64;
        let abs = scaled.unsigned_abs();
        Self{
            negative: scaled < 0,
            whole: (abs / 100).min(u32::MAX as u64) as u32,
            fraction: (abs % 100) as u8,
        }
    }
}

struct Distance(Range);

impl fmt::Display for Distance{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0{
            Range::Measured(cm) => write!(f, "{:.2} cm", cm),
            Range::NoEcho => f.write_str("no echo"),
        }
    }
}

impl fmt::Display for Event{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.message()){
            (Event::Readings(s), _) => write!(
                f,
                "Front Distance: {} | Side Distance: {} | Temperature: {:.2} °C | Gas Level: {}",
                Distance(s.front),
                Distance(s.side),
                s.temperature_c,
                s.gas_level
            ),
            (_, Some(msg)) => f.write_str(msg),
            (_, None) => Ok(()),
        }
    }
}
