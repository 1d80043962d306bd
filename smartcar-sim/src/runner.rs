use std::{path::PathBuf, time::Duration};

use smartcar_core::{
    config::Config,
    control::{Controller, Tick},
    drive::{DriveTrain, Side},
};
use tokio::time::{interval, MissedTickBehavior};

use crate::{
    error::SimError,
    logger::LogSink,
    rig::{lock, share, SharedWorld, SimChannel, SimPump, SimSensors},
    telemetry::{record_to, CycleRecord, Summary},
    world::World,
};

pub type SimCar = Controller<SimSensors, SimChannel, SimChannel, SimPump>;

pub const DEFAULT_TICK_MS:u64 = 10;

#[derive(Debug, Clone)]
pub struct RunOptions{
    /// Stop after this many completed cycles
    pub cycles: u32,
    /// Pace ticks against the wall clock instead of running as fast as possible
    pub realtime: bool,
    pub record: Option<PathBuf>,
}

impl Default for RunOptions{
    fn default() -> Self {
        Self{
            cycles: 200,
            realtime: false,
            record: None,
        }
    }
}

/// The controller wired to a simulated world, advanced on a virtual millisecond clock
pub struct Simulation{
    world: SharedWorld,
    car: SimCar,
    sink: LogSink,
    now: u32,
    tick_ms: u32,
}

impl Simulation{
    pub fn new(world: World, config: Config, tick: Duration) -> Self {
        let world = share(world);
        lock(&world).set_duty(config.motor_speed);
        let drive = DriveTrain::new(
            SimChannel::new(Side::Left, world.clone()),
            SimChannel::new(Side::Right, world.clone()),
        );
        let car = Controller::new(SimSensors::new(world.clone()), drive, SimPump::new(world.clone()), config);
        Self{
            world,
            car,
            sink: LogSink::default(),
            now: 0,
            tick_ms: u32::try_from(tick.as_millis()).unwrap_or(u32::MAX).max(1),
        }
    }

    pub fn world(&self) -> &SharedWorld {
        &self.world
    }
    pub fn car(&self) -> &SimCar {
        &self.car
    }
    pub fn car_mut(&mut self) -> &mut SimCar {
        &mut self.car
    }
    /// Simulated milliseconds per step, never zero
    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }
    pub fn now(&self) -> u32 {
        self.now
    }
    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    pub fn start(&mut self){
        self.car.start(self.now, &mut self.sink);
    }

    /// One controller tick then one physics step. Returns the record of a cycle if one ran.
    pub fn step(&mut self) -> Option<CycleRecord> {
        let record = match self.car.tick(self.now, &mut self.sink){
            Tick::Cycle(report) => {
                let world = lock(&self.world);
                Some(CycleRecord{
                    report,
                    pose: world.pose(),
                    pump_on: world.pump_on(),
                    collisions: world.collisions(),
                })
            }
            Tick::Holding => None,
        };
        lock(&self.world).step(self.tick_ms);
        self.now = self.now.wrapping_add(self.tick_ms);
        record
    }
}

/// Starts the car and steps it until `options.cycles` cycles have run.
/// A recorder that fails ends the run early with its error.
pub async fn run(sim: &mut Simulation, options: &RunOptions) -> Result<Summary, SimError> {
    let (record_tx, record_rx) = flume::unbounded();
    let mut recorder = options.record.clone().map(|path| tokio::spawn(record_to(path, record_rx)));

    let mut pacer = if options.realtime{
        let mut pacer = interval(Duration::from_millis(sim.tick_ms() as u64));
        pacer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(pacer)
    }
    else{
        None
    };

    let mut summary = Summary::default();
    sim.start();
    while summary.cycles < options.cycles{
        match pacer.as_mut(){
            Some(pacer) => {
                pacer.tick().await;
            }
            None => tokio::task::yield_now().await,
        }
        if recorder.as_ref().map_or(false, |r| r.is_finished()){
            break;
        }
        if let Some(record) = sim.step(){
            summary.add(&record);
            if recorder.is_some() && record_tx.send(record).is_err(){
                break;
            }
        }
    }
    drop(record_tx);

    if let Some(recorder) = recorder.take(){
        let written = recorder.await??;
        log::debug!("recorded {} cycles", written);
    }
    summary.absorb(sim.sink().tally());
    Ok(summary)
}
