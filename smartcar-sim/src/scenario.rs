use std::f32::consts::FRAC_PI_2;

use clap::ValueEnum;
use glam::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::world::{Fire, GasPlume, Noise, Pose, World};

/// Sensor jitter used by every built-in arena
pub const ARENA_NOISE: Noise = Noise{
    range_cm: 0.5,
    temperature_c: 0.3,
    gas: 4.0,
};

/// Built-in arenas. All of them fit inside the rangers' 400cm reach.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario{
    /// Square room with a few scattered posts
    OpenField,
    /// Long narrow hall, the car follows it and turns at the end
    Corridor,
    /// Pocket too narrow to turn into, forces the back up maneuver
    DeadEnd,
    /// A burning post ahead of the car
    Fire,
    /// A gas leak ahead of the car
    GasLeak,
}

impl Scenario{
    pub fn build(self, seed: u64) -> World {
        match self{
            Scenario::OpenField => open_field(seed),
            Scenario::Corridor => World::new(380.0, 60.0, Pose::new(30.0, 30.0, 0.0), seed).with_noise(ARENA_NOISE),
            Scenario::DeadEnd => World::new(120.0, 36.0, Pose::new(40.0, 18.0, 0.0), seed).with_noise(ARENA_NOISE),
            Scenario::Fire => {
                let blaze = Vec2::new(220.0, 150.0);
                World::new(300.0, 300.0, Pose::new(40.0, 150.0, 0.0), seed)
                    .with_noise(ARENA_NOISE)
                    .with_obstacle(blaze, 20.0)
                    .with_fire(Fire{center: blaze, radius: 120.0, intensity: 60.0})
            }
            Scenario::GasLeak => World::new(300.0, 300.0, Pose::new(40.0, 150.0, 0.0), seed)
                .with_noise(ARENA_NOISE)
                .with_plume(GasPlume{center: Vec2::new(200.0, 150.0), radius: 200.0, concentration: 500.0}),
        }
    }
}

fn open_field(seed: u64) -> World {
    let start = Pose::new(190.0, 60.0, FRAC_PI_2);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = World::new(380.0, 380.0, start, seed).with_noise(ARENA_NOISE);
    let mut placed = 0;
    while placed < 4{
        let center = Vec2::new(rng.gen_range(60.0..320.0), rng.gen_range(60.0..320.0));
        if center.distance(start.position()) < 70.0{
            continue;
        }
        world = world.with_obstacle(center, rng.gen_range(12.0..25.0));
        placed += 1;
    }
    world
}
