use std::{path::PathBuf, time::Duration};

use clap::Parser;
use log::{error, info};
use smartcar_core::config::Config;
use smartcar_sim::{
    error::SimError,
    runner::{run, RunOptions, Simulation, DEFAULT_TICK_MS},
    scenario::Scenario,
    telemetry::{read_recording, Summary},
};

#[derive(Parser)]
#[command(about = "Runs the smart car control loop in a simulated arena")]
struct SimArgs{
    #[arg(short, long, value_enum, default_value_t = Scenario::Corridor)]
    scenario: Scenario,
    /// Number of control cycles to run
    #[arg(short, long, default_value_t = 200)]
    cycles: u32,
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Simulated milliseconds per tick
    #[arg(long, default_value_t = DEFAULT_TICK_MS, value_parser = clap::value_parser!(u64).range(1..=u32::MAX as u64))]
    tick_ms: u64,
    /// Pace the simulation against the wall clock
    #[arg(long)]
    realtime: bool,
    /// Write every cycle to this file
    #[arg(long)]
    record: Option<PathBuf>,
    /// Summarize an existing recording instead of running
    #[arg(long, conflicts_with = "record")]
    replay: Option<PathBuf>,
    #[arg(long)]
    max_temperature: Option<f32>,
    #[arg(long)]
    gas_threshold: Option<u16>,
    #[arg(long)]
    safe_distance: Option<f32>,
    /// Minimum time between two spray activations
    #[arg(long)]
    spray_cooldown_ms: Option<u32>,
}

impl SimArgs{
    fn config(&self) -> Config {
        let mut config = Config::DEFAULT;
        if let Some(c) = self.max_temperature{
            config.thresholds.max_temperature_c = c;
        }
        if let Some(gas) = self.gas_threshold{
            config.thresholds.gas_threshold = gas;
        }
        if let Some(cm) = self.safe_distance{
            config.thresholds.safe_distance_cm = cm;
        }
        if let Some(ms) = self.spray_cooldown_ms{
            config.timing.spray_cooldown_ms = ms;
        }
        config
    }
}

async fn launch(args: SimArgs) -> Result<Summary, SimError> {
    if let Some(path) = &args.replay{
        let records = read_recording(path).await?;
        return Ok(Summary::from_records(&records));
    }
    let tick = Duration::from_millis(args.tick_ms);
    let mut sim = Simulation::new(args.scenario.build(args.seed), args.config(), tick);
    let options = RunOptions{
        cycles: args.cycles,
        realtime: args.realtime,
        record: args.record.clone(),
    };
    info!("Running {:?} for {} cycles", args.scenario, args.cycles);
    run(&mut sim, &options).await
}

fn main(){
    pretty_env_logger::init();
    let args = SimArgs::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build().expect("Could not build tokio runtime");
    match runtime.block_on(launch(args)){
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
