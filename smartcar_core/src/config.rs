use serde::{Deserialize, Serialize};

/// Hazard and clearance limits checked every cycle
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Thresholds{
    /// Temperatures strictly above this (°C) are a hazard and trigger the spray
    pub max_temperature_c: f32,
    /// Gas readings strictly above this (raw ADC units) are a hazard
    pub gas_threshold: u16,
    /// Minimum clearance in centimeters for the path ahead to count as open
    pub safe_distance_cm: f32,
}

/// Hold durations of the control loop, all in milliseconds
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing{
    pub cycle_delay_ms: u32,
    pub spray_ms: u32,
    pub backup_ms: u32,
    pub turn_ms: u32,
    /// Minimum gap between two spray activations. Zero re-sprays every cycle.
    pub spray_cooldown_ms: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Config{
    pub thresholds: Thresholds,
    pub timing: Timing,
    /// PWM duty (0-255) written to both motor enables once at start up
    pub motor_speed: u8,
}

impl Thresholds{
    pub const DEFAULT: Self = Self{
        max_temperature_c: 50.0,
        gas_threshold: 400,
        safe_distance_cm: 20.0,
    };
}

impl Timing{
    pub const DEFAULT: Self = Self{
        cycle_delay_ms: 100,
        spray_ms: 2000,
        backup_ms: 500,
        turn_ms: 700,
        spray_cooldown_ms: 0,
    };
}

impl Config{
    pub const DEFAULT: Self = Self{
        thresholds: Thresholds::DEFAULT,
        timing: Timing::DEFAULT,
        motor_speed: 200,
    };

    pub const fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
    pub const fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for Thresholds{
    fn default() -> Self {
        Self::DEFAULT
    }
}
impl Default for Timing{
    fn default() -> Self {
        Self::DEFAULT
    }
}
impl Default for Config{
    fn default() -> Self {
        Self::DEFAULT
    }
}
