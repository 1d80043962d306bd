use serde::{Deserialize, Serialize};

use crate::{config::Thresholds, sensors::SensorSnapshot};

/// Which environmental limits a snapshot broke
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HazardStatus{
    pub high_temperature: bool,
    pub harmful_gas: bool,
}

impl HazardStatus{
    pub const CLEAR: Self = Self{
        high_temperature: false,
        harmful_gas: false,
    };

    /// True when either limit was broken, the car must stop
    pub fn is_hazard(&self) -> bool {
        self.high_temperature || self.harmful_gas
    }
    /// Only heat is answered with water, gas has no actuator
    pub fn spray_required(&self) -> bool {
        self.high_temperature
    }
}

/// Checks both limits independently, both are strict comparisons
pub fn evaluate_hazard(snapshot: &SensorSnapshot, thresholds: &Thresholds) -> HazardStatus {
    HazardStatus{
        high_temperature: snapshot.temperature_c > thresholds.max_temperature_c,
        harmful_gas: snapshot.gas_level > thresholds.gas_threshold,
    }
}
