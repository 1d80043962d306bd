use serde::{Deserialize, Serialize};

/// Centimeters travelled by sound per microsecond
pub const SOUND_CM_PER_US: f32 = 0.034;
/// Largest value the 10 bit ADC can return
pub const ADC_MAX: u16 = 1023;
/// LM35 scaling: 5V reference over 1024 steps at 10mV per degree
pub const CELSIUS_PER_COUNT: f32 = 5.0 * 100.0 / 1024.0;

/// The two ultrasonic rangers mounted on the car
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSensor{
    Front,
    Side,
}

/// The two analog probes
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogInput{
    Temperature,
    Gas,
}

/// Outcome of a single ranging attempt.
///
/// `NoEcho` is kept apart from a measured zero so that a timed out or
/// disconnected ranger can never be mistaken for an open path.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Range{
    Measured(f32),
    NoEcho,
}

impl Range{
    /// Converts an echo round trip time into a distance
    pub fn from_echo(echo_us: Option<u32>) -> Range {
        match echo_us{
            Some(us) => Range::Measured(echo_to_cm(us)),
            None => Range::NoEcho,
        }
    }
    pub fn cm(&self) -> Option<f32> {
        match self{
            Range::Measured(cm) => Some(*cm),
            Range::NoEcho => None,
        }
    }
    pub fn is_no_echo(&self) -> bool {
        matches!(self, Range::NoEcho)
    }
}

/// Everything the decision logic gets to see for one cycle
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SensorSnapshot{
    pub front: Range,
    pub side: Range,
    pub temperature_c: f32,
    pub gas_level: u16,
}

impl SensorSnapshot{
    /// Convenience constructor for two measured distances
    pub fn measured(front_cm: f32, side_cm: f32, temperature_c: f32, gas_level: u16) -> Self {
        Self{
            front: Range::Measured(front_cm),
            side: Range::Measured(side_cm),
            temperature_c,
            gas_level,
        }
    }
}

/// Raw access to the car's sensing hardware.
///
/// Implemented once per platform: the Uno board, the simulator and test doubles.
pub trait SensorPort{
    /// Triggers the ranger and returns the echo high time in microseconds,
    /// or `None` if the echo never came back before the timeout
    fn echo_us(&mut self, sensor: RangeSensor) -> Option<u32>;
    /// Reads the probe's raw 10 bit ADC value
    fn analog(&mut self, input: AnalogInput) -> u16;
}

/// Half of the round trip at the speed of sound
pub fn echo_to_cm(echo_us: u32) -> f32 {
    echo_us as f32 * SOUND_CM_PER_US / 2.0
}

/// Linear LM35 conversion, raw values past the ADC range are clamped
pub fn adc_to_celsius(raw: u16) -> f32 {
    raw.min(ADC_MAX) as f32 * CELSIUS_PER_COUNT
}

/// Takes one snapshot: front ranger, side ranger, temperature then gas.
/// The gas level is passed through as read.
pub fn read_sensors<P: SensorPort + ?Sized>(port: &mut P) -> SensorSnapshot {
    let front = Range::from_echo(port.echo_us(RangeSensor::Front));
    let side = Range::from_echo(port.echo_us(RangeSensor::Side));
    let temperature_c = adc_to_celsius(port.analog(AnalogInput::Temperature));
    let gas_level = port.analog(AnalogInput::Gas);

    SensorSnapshot{
        front,
        side,
        temperature_c,
        gas_level,
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn echo_conversion_halves_round_trip(){
        // 1000us there and back is 17cm
        assert!((echo_to_cm(1000) - 17.0).abs() < 1e-4);
        assert_eq!(echo_to_cm(0), 0.0);
    }

    #[test]
    fn adc_is_clamped(){
        assert_eq!(adc_to_celsius(4000), adc_to_celsius(ADC_MAX));
    }
}
