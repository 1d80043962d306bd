use embedded_hal::digital::v2::OutputPin;
use serde::{Deserialize, Serialize};

use crate::navigation::MovementDirective;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side{
    Left,
    Right,
}

/// Direction signal of one H-bridge channel
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelDirection{
    Forward,
    Reverse,
    Off,
}

/// An output that refused a write
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorFault{
    Channel(Side),
    Pump,
}

pub trait MotorChannel{
    fn set_direction(&mut self, direction: ChannelDirection) -> Result<(), ActuatorFault>;
}

pub trait Pump{
    fn set_spraying(&mut self, on: bool) -> Result<(), ActuatorFault>;
}

/// Left and right channel signals for a directive
pub const fn channel_pair(directive: MovementDirective) -> (ChannelDirection, ChannelDirection) {
    use ChannelDirection::*;
    match directive{
        MovementDirective::Forward => (Forward, Forward),
        MovementDirective::Backward => (Reverse, Reverse),
        MovementDirective::TurnRight => (Forward, Reverse),
        MovementDirective::TurnLeft => (Reverse, Forward),
        MovementDirective::Stop => (Off, Off),
    }
}

/// One motor driven through a pair of direction inputs
pub struct HBridgeChannel<In1: OutputPin, In2: OutputPin>{
    side: Side,
    in1: In1,
    in2: In2,
}

impl<In1: OutputPin, In2: OutputPin> HBridgeChannel<In1, In2>{
    pub fn new(side: Side, in1: In1, in2: In2) -> Self {
        Self{
            side,
            in1,
            in2,
        }
    }
    pub fn release(self) -> (In1, In2) {
        (self.in1, self.in2)
    }
}

impl<In1: OutputPin, In2: OutputPin> MotorChannel for HBridgeChannel<In1, In2>{
    fn set_direction(&mut self, direction: ChannelDirection) -> Result<(), ActuatorFault> {
        let fault = ActuatorFault::Channel(self.side);
        // Always drop the opposing input first so the bridge never sees both high
        match direction{
            ChannelDirection::Forward => {
                self.in2.set_low().map_err(|_| fault)?;
                self.in1.set_high().map_err(|_| fault)
            }
            ChannelDirection::Reverse => {
                self.in1.set_low().map_err(|_| fault)?;
                self.in2.set_high().map_err(|_| fault)
            }
            ChannelDirection::Off => {
                self.in1.set_low().map_err(|_| fault)?;
                self.in2.set_low().map_err(|_| fault)
            }
        }
    }
}

/// Water pump switched by a single output, high is on
pub struct PumpSwitch<P: OutputPin>{
    ctl: P,
}

impl<P: OutputPin> PumpSwitch<P>{
    pub fn new(ctl: P) -> Self {
        Self{ ctl }
    }
}

impl<P: OutputPin> Pump for PumpSwitch<P>{
    fn set_spraying(&mut self, on: bool) -> Result<(), ActuatorFault> {
        let written = if on{
            self.ctl.set_high()
        }
        else{
            self.ctl.set_low()
        };
        written.map_err(|_| ActuatorFault::Pump)
    }
}

/// Both motor channels of the car
pub struct DriveTrain<L: MotorChannel, R: MotorChannel>{
    left: L,
    right: R,
}

impl<L: MotorChannel, R: MotorChannel> DriveTrain<L, R>{
    pub fn new(left: L, right: R) -> Self {
        Self{ left, right }
    }

    /// Writes both channels before returning. A failing left channel does not
    /// stop the right one from being written, the first fault is reported.
    pub fn apply(&mut self, directive: MovementDirective) -> Result<(), ActuatorFault> {
        let (left, right) = channel_pair(directive);
        let left = self.left.set_direction(left);
        let right = self.right.set_direction(right);
        left.and(right)
    }

    pub fn left(&self) -> &L {
        &self.left
    }
    pub fn right(&self) -> &R {
        &self.right
    }
    pub fn left_mut(&mut self) -> &mut L {
        &mut self.left
    }
    pub fn right_mut(&mut self) -> &mut R {
        &mut self.right
    }
}
