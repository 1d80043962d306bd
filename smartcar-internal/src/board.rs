use arduino_hal::{
    adc::Channel,
    port::{mode::{Floating, Input, Output}, Pin},
    Adc,
};
use smartcar_core::sensors::{AnalogInput, RangeSensor, SensorPort};

use crate::{clock::Clock, ultrasonic::HcSr04};

pub type Ranger = HcSr04<Pin<Output>, Pin<Input<Floating>>>;

/// Everything the car senses with, plus the clock the rangers time against
pub struct Board{
    pub front: Ranger,
    pub side: Ranger,
    pub adc: Adc,
    /// LM35 on `A0`
    pub temperature: Channel,
    /// MQ-2 on `A1`
    pub gas: Channel,
    pub clock: Clock,
}

impl Board{
    pub fn millis(&self) -> u32 {
        self.clock.millis()
    }
}

impl SensorPort for Board{
    fn echo_us(&mut self, sensor: RangeSensor) -> Option<u32> {
        match sensor{
            RangeSensor::Front => self.front.echo_us(&self.clock),
            RangeSensor::Side => self.side.echo_us(&self.clock),
        }
    }

    fn analog(&mut self, input: AnalogInput) -> u16 {
        match input{
            AnalogInput::Temperature => self.adc.read_blocking(&self.temperature),
            AnalogInput::Gas => self.adc.read_blocking(&self.gas),
        }
    }
}
