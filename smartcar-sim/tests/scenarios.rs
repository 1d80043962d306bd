use std::time::Duration;

use smartcar_core::{
    config::Config,
    event::EventSink,
    navigation::{Movement, MovementDirective},
};
use smartcar_sim::{
    error::SimError,
    logger::LogSink,
    rig::lock,
    runner::{run, RunOptions, Simulation},
    scenario::Scenario,
    telemetry::{read_recording, CycleRecord, Summary},
};

const TICK: Duration = Duration::from_millis(10);

fn simulation(scenario: Scenario) -> Simulation {
    Simulation::new(scenario.build(3), Config::DEFAULT, TICK)
}

fn collect(sim: &mut Simulation, cycles: usize) -> Vec<CycleRecord> {
    let mut records = Vec::new();
    sim.start();
    while records.len() < cycles{
        if let Some(record) = sim.step(){
            records.push(record);
        }
    }
    records
}

#[test]
pub fn dead_end_forces_back_up(){
    let mut sim = simulation(Scenario::DeadEnd);
    let records = collect(&mut sim, 60);
    let summary = Summary::from_records(&records);
    assert!(summary.maneuvers >= 1, "{}", summary);
    assert!(summary.directives.backward >= 1);
    assert_eq!(summary.directives.turn_left, 0);
    // the first maneuver is the only way out of the pocket
    let first = records.iter().find(|r| matches!(r.report.movement, Movement::BackUpAndTurn{..})).unwrap();
    assert!(first.report.snapshot.front.cm().unwrap() < 20.0);
    assert!(first.report.snapshot.side.cm().unwrap() <= 20.0);
}

#[test]
pub fn fire_is_sprayed_until_it_fades(){
    let mut sim = simulation(Scenario::Fire);
    let records = collect(&mut sim, 150);
    let summary = Summary::from_records(&records);
    assert!(summary.heat_hazards >= 1);
    assert!(summary.sprays >= 1);
    assert_eq!(summary.directives.turn_left, 0);

    for record in &records{
        if record.report.hazard.is_hazard(){
            assert_eq!(record.report.movement, Movement::Drive(MovementDirective::Stop));
        }
        if record.report.sprayed{
            assert!(record.pump_on);
        }
    }

    let world = lock(sim.world());
    assert!(world.fires()[0].intensity < 60.0);
    assert!(world.sprayed_ms() >= 2000);
}

#[test]
pub fn gas_leak_stops_without_spraying(){
    let mut sim = simulation(Scenario::GasLeak);
    let records = collect(&mut sim, 100);
    let summary = Summary::from_records(&records);
    assert!(summary.gas_hazards >= 1);
    assert_eq!(summary.sprays, 0);
    assert!(!lock(sim.world()).pump_on());
    let last = records.last().unwrap();
    assert!(last.pose.x < 200.0);
}

#[test]
pub fn corridor_never_turns_left(){
    let mut sim = simulation(Scenario::Corridor);
    let summary = Summary::from_records(&collect(&mut sim, 300));
    assert_eq!(summary.directives.turn_left, 0);
    assert!(summary.directives.forward > 0);
    assert!(summary.directives.turn_right > 0);
}

#[test]
pub fn open_field_is_the_same_for_a_seed(){
    let a = Summary::from_records(&collect(&mut simulation(Scenario::OpenField), 50));
    let b = Summary::from_records(&collect(&mut simulation(Scenario::OpenField), 50));
    assert_eq!(a, b);
}

#[test]
pub fn jammed_channel_is_tallied(){
    let mut sim = simulation(Scenario::Corridor);
    sim.car_mut().drive_mut().left_mut().jam(true);
    collect(&mut sim, 5);
    assert!(sim.sink().tally().faults >= 5);
}

#[test]
pub fn log_sink_counts_warnings(){
    use smartcar_core::{event::Event, sensors::RangeSensor};
    let mut sink = LogSink::default();
    sink.record(Event::RangerTimeout(RangeSensor::Front));
    sink.record(Event::SpraySuppressed);
    sink.record(Event::SprayOn);
    let tally = sink.tally();
    assert_eq!(tally.ranger_timeouts, 1);
    assert_eq!(tally.sprays_suppressed, 1);
    assert_eq!(tally.faults, 0);
}

#[tokio::test]
async fn recording_reads_back(){
    let path = std::env::temp_dir().join(format!("smartcar-sim-{}.rec", std::process::id()));
    let mut sim = simulation(Scenario::Corridor);
    let options = RunOptions{
        cycles: 30,
        record: Some(path.clone()),
        ..Default::default()
    };
    let summary = run(&mut sim, &options).await.unwrap();
    let records = read_recording(&path).await.unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(records.len(), 30);
    assert_eq!(records.first().unwrap().report.cycle, 1);
    let replayed = Summary::from_records(&records);
    assert_eq!(replayed.cycles, summary.cycles);
    assert_eq!(replayed.directives, summary.directives);
    assert_eq!(replayed.final_pose, summary.final_pose);
}

#[tokio::test]
async fn realtime_run_paces_ticks(){
    let mut sim = Simulation::new(Scenario::Corridor.build(1), Config::DEFAULT, Duration::from_millis(1));
    let options = RunOptions{
        cycles: 2,
        realtime: true,
        record: None,
    };
    let started = std::time::Instant::now();
    let summary = run(&mut sim, &options).await.unwrap();
    assert_eq!(summary.cycles, 2);
    // the second cycle waits out one 100ms cycle delay
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn zero_tick_steps_one_millisecond(){
    let mut sim = Simulation::new(Scenario::Corridor.build(1), Config::DEFAULT, Duration::ZERO);
    assert_eq!(sim.tick_ms(), 1);
    let options = RunOptions{
        cycles: 2,
        ..Default::default()
    };
    let summary = run(&mut sim, &options).await.unwrap();
    assert_eq!(summary.cycles, 2);
    assert_eq!(sim.now(), 101);

    let mut sim = Simulation::new(Scenario::Corridor.build(1), Config::DEFAULT, Duration::ZERO);
    let options = RunOptions{
        cycles: 2,
        realtime: true,
        record: None,
    };
    assert_eq!(run(&mut sim, &options).await.unwrap().cycles, 2);
}

#[test]
pub fn huge_tick_saturates(){
    let sim = Simulation::new(Scenario::Corridor.build(1), Config::DEFAULT, Duration::from_secs(u64::MAX / 1000));
    assert_eq!(sim.tick_ms(), u32::MAX);
}

#[tokio::test]
async fn failed_recorder_ends_the_run(){
    let path = std::env::temp_dir().join("smartcar-sim-missing-dir").join("nested").join("run.rec");
    let mut sim = simulation(Scenario::Corridor);
    let options = RunOptions{
        cycles: u32::MAX,
        record: Some(path),
        ..Default::default()
    };
    match run(&mut sim, &options).await{
        Err(SimError::Io(_)) => {}
        other => panic!("expected an io error, got {:?}", other.map(|s| s.cycles)),
    }
    assert!(sim.car().cycles() < u32::MAX);
}
