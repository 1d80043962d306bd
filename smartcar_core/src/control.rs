//! The control loop as a non-blocking tick function.
//!
//! The spray (2s) and the back up maneuver (500ms + 700ms) are holds, not waits.
//! Every hold is a [Phase] with an expiry timestamp and [Controller::tick] only
//! ever checks the clock and moves on. A new cycle never starts before the
//! previous one has finished its holds and its pacing delay.
//!
//! Timestamps are wrapping `u32` milliseconds, the same unit a `millis()` counter
//! on the board produces.

use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    drive::{DriveTrain, MotorChannel, Pump},
    event::{Event, EventSink},
    hazard::{evaluate_hazard, HazardStatus},
    navigation::{decide_movement, HeldDirective, Movement, MovementDirective},
    sensors::{read_sensors, RangeSensor, SensorPort, SensorSnapshot},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase{
    /// Next tick runs a full cycle
    Ready,
    /// Pump is on and the car is stopped
    Spraying{ until: u32 },
    /// First half of the back up maneuver, the turn is applied on expiry
    Backing{ until: u32, turn: HeldDirective },
    Turning{ until: u32 },
    /// Delay between the end of one cycle and the start of the next
    Pacing{ until: u32 },
}

/// What one cycle saw and did
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CycleReport{
    pub cycle: u32,
    pub at_ms: u32,
    pub snapshot: SensorSnapshot,
    pub hazard: HazardStatus,
    /// `Drive(Stop)` whenever a hazard was present
    pub movement: Movement,
    pub sprayed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick{
    /// A hold or the pacing delay is still running
    Holding,
    Cycle(CycleReport),
}

/// `now` has reached or passed `deadline`, across counter wrap
pub fn reached(now: u32, deadline: u32) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

pub struct Controller<S: SensorPort, L: MotorChannel, R: MotorChannel, P: Pump>{
    sensors: S,
    drive: DriveTrain<L, R>,
    pump: P,
    config: Config,
    phase: Phase,
    last_spray: Option<u32>,
    cycles: u32,
}

impl<S: SensorPort, L: MotorChannel, R: MotorChannel, P: Pump> Controller<S, L, R, P>{
    pub fn new(sensors: S, drive: DriveTrain<L, R>, pump: P, config: Config) -> Self {
        Self{
            sensors,
            drive,
            pump,
            config,
            phase: Phase::Ready,
            last_spray: None,
            cycles: 0,
        }
    }

    /// Puts every output in its safe state and announces the car
    pub fn start(&mut self, _now: u32, sink: &mut impl EventSink){
        if let Err(fault) = self.pump.set_spraying(false){
            sink.record(Event::Fault(fault));
        }
        if let Err(fault) = self.drive.apply(MovementDirective::Stop){
            sink.record(Event::Fault(fault));
        }
        self.phase = Phase::Ready;
        self.last_spray = None;
        self.cycles = 0;
        sink.record(Event::Initialized);
    }

    /// Advances the loop to `now`. Never waits.
    pub fn tick(&mut self, now: u32, sink: &mut impl EventSink) -> Tick {
        match self.phase{
            Phase::Ready => return Tick::Cycle(self.run_cycle(now, sink)),
            Phase::Pacing{ until } if reached(now, until) => return Tick::Cycle(self.run_cycle(now, sink)),
            Phase::Spraying{ until } if reached(now, until) => {
                self.switch_pump(false, sink);
                sink.record(Event::SprayOff);
                self.pace(now);
            }
            Phase::Backing{ until, turn } if reached(now, until) => {
                self.apply(turn.directive, sink);
                self.phase = Phase::Turning{ until: now.wrapping_add(turn.hold_ms) };
            }
            Phase::Turning{ until } if reached(now, until) => self.pace(now),
            _ => {}
        }
        Tick::Holding
    }

    /// When the next tick has something to do, `None` if it is due now
    pub fn next_deadline(&self) -> Option<u32> {
        match self.phase{
            Phase::Ready => None,
            Phase::Spraying{ until } | Phase::Backing{ until, .. } | Phase::Turning{ until } | Phase::Pacing{ until } => Some(until),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn cycles(&self) -> u32 {
        self.cycles
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }
    pub fn drive(&self) -> &DriveTrain<L, R> {
        &self.drive
    }
    pub fn drive_mut(&mut self) -> &mut DriveTrain<L, R> {
        &mut self.drive
    }
    pub fn pump(&self) -> &P {
        &self.pump
    }

    fn run_cycle(&mut self, now: u32, sink: &mut impl EventSink) -> CycleReport {
        self.cycles = self.cycles.wrapping_add(1);
        let snapshot = read_sensors(&mut self.sensors);

        if snapshot.front.is_no_echo(){
            sink.record(Event::RangerTimeout(RangeSensor::Front));
        }
        if snapshot.side.is_no_echo(){
            sink.record(Event::RangerTimeout(RangeSensor::Side));
        }

        let hazard = evaluate_hazard(&snapshot, &self.config.thresholds);
        let mut sprayed = false;
        if hazard.spray_required(){
            sink.record(Event::HighTemperature(snapshot.temperature_c));
            if self.spray_allowed(now){
                sink.record(Event::SprayOn);
                self.switch_pump(true, sink);
                self.last_spray = Some(now);
                sprayed = true;
            }
            else{
                sink.record(Event::SpraySuppressed);
            }
        }
        if hazard.harmful_gas{
            sink.record(Event::HarmfulGas(snapshot.gas_level));
        }

        let movement = if hazard.is_hazard(){
            Movement::Drive(MovementDirective::Stop)
        }
        else{
            decide_movement(&snapshot, &self.config.thresholds, &self.config.timing)
        };

        match movement{
            Movement::Drive(directive) => {
                self.apply(directive, sink);
                self.pace(now);
            }
            Movement::BackUpAndTurn{ backup, turn } => {
                self.apply(backup.directive, sink);
                self.phase = Phase::Backing{ until: now.wrapping_add(backup.hold_ms), turn };
            }
        }
        if sprayed{
            self.phase = Phase::Spraying{ until: now.wrapping_add(self.config.timing.spray_ms) };
        }

        sink.record(Event::Readings(snapshot));

        CycleReport{
            cycle: self.cycles,
            at_ms: now,
            snapshot,
            hazard,
            movement,
            sprayed,
        }
    }

    fn spray_allowed(&self, now: u32) -> bool {
        match self.last_spray{
            Some(last) if self.config.timing.spray_cooldown_ms > 0 => {
                now.wrapping_sub(last) >= self.config.timing.spray_cooldown_ms
            }
            _ => true,
        }
    }

    fn apply(&mut self, directive: MovementDirective, sink: &mut impl EventSink){
        if let Err(fault) = self.drive.apply(directive){
            sink.record(Event::Fault(fault));
        }
        sink.record(Event::Moving(directive));
    }

    fn switch_pump(&mut self, on: bool, sink: &mut impl EventSink){
        if let Err(fault) = self.pump.set_spraying(on){
            sink.record(Event::Fault(fault));
        }
    }

    fn pace(&mut self, now: u32){
        self.phase = Phase::Pacing{ until: now.wrapping_add(self.config.timing.cycle_delay_ms) };
    }
}
