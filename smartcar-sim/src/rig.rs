//! The simulated car's hardware. Every handle shares one [World], so whatever the
//! controller writes to a channel shows up in the next physics step.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use smartcar_core::{
    drive::{ActuatorFault, ChannelDirection, MotorChannel, Pump, Side},
    sensors::{AnalogInput, RangeSensor, SensorPort},
};

use crate::world::World;

pub type SharedWorld = Arc<Mutex<World>>;

pub fn share(world: World) -> SharedWorld {
    Arc::new(Mutex::new(world))
}

/// A panic elsewhere leaves the world as it was, so a poisoned lock is still usable
pub fn lock(world: &SharedWorld) -> MutexGuard<'_, World> {
    world.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct SimSensors{
    world: SharedWorld,
}

impl SimSensors{
    pub fn new(world: SharedWorld) -> Self {
        Self{world}
    }
}

impl SensorPort for SimSensors{
    fn echo_us(&mut self, sensor: RangeSensor) -> Option<u32> {
        lock(&self.world).echo_us(sensor)
    }
    fn analog(&mut self, input: AnalogInput) -> u16 {
        lock(&self.world).analog(input)
    }
}

pub struct SimChannel{
    side: Side,
    world: SharedWorld,
    /// Refuse every write, to exercise the fault path
    jammed: bool,
}

impl SimChannel{
    pub fn new(side: Side, world: SharedWorld) -> Self {
        Self{side, world, jammed: false}
    }
    pub fn jam(&mut self, jammed: bool){
        self.jammed = jammed;
    }
}

impl MotorChannel for SimChannel{
    fn set_direction(&mut self, direction: ChannelDirection) -> Result<(), ActuatorFault> {
        if self.jammed{
            return Err(ActuatorFault::Channel(self.side));
        }
        lock(&self.world).set_channel(self.side, direction);
        Ok(())
    }
}

pub struct SimPump{
    world: SharedWorld,
}

impl SimPump{
    pub fn new(world: SharedWorld) -> Self {
        Self{world}
    }
}

impl Pump for SimPump{
    fn set_spraying(&mut self, on: bool) -> Result<(), ActuatorFault> {
        lock(&self.world).set_pump(on);
        Ok(())
    }
}
