use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smartcar_core::{
    drive::{ChannelDirection, Side},
    sensors::{AnalogInput, RangeSensor, ADC_MAX, CELSIUS_PER_COUNT, SOUND_CM_PER_US},
};

/// Past this the HC-SR04 gives up and the pulse times out
pub const MAX_RANGE_CM:f32 = 400.0;
/// Straight line speed at full duty
pub const TOP_SPEED_CM_S:f32 = 60.0;
/// Spin rate at full duty with the channels driven in opposite directions
pub const TOP_TURN_RAD_S:f32 = 2.5;
/// Footprint used for collisions against walls and obstacles
pub const CAR_RADIUS_CM:f32 = 10.0;
/// Heat removed from a fire per second of spraying while the car sits in its heat zone
pub const EXTINGUISH_C_PER_S:f32 = 6.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Pose{
    pub x: f32,
    pub y: f32,
    /// Radians, counter clockwise from +x
    pub heading: f32,
}

impl Pose{
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self{x, y, heading}
    }
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
    pub fn facing(&self) -> Vec2 {
        Vec2::new(self.heading.cos(), self.heading.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle{
    pub center: Vec2,
    pub radius: f32,
}

/// A heat source. Adds `intensity` °C at its center, fading to nothing at `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fire{
    pub center: Vec2,
    pub radius: f32,
    pub intensity: f32,
}

/// Adds `concentration` raw MQ-2 counts at its center, fading to nothing at `radius`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasPlume{
    pub center: Vec2,
    pub radius: f32,
    pub concentration: f32,
}

/// Uniform jitter applied to every reading, zero disables it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Noise{
    pub range_cm: f32,
    pub temperature_c: f32,
    pub gas: f32,
}

/// A walled rectangle from (0, 0) to (width, height) in centimeters, with the car in it
pub struct World{
    width: f32,
    height: f32,
    obstacles: Vec<Circle>,
    fires: Vec<Fire>,
    plumes: Vec<GasPlume>,
    ambient_c: f32,
    background_gas: f32,
    noise: Noise,
    rng: StdRng,
    pose: Pose,
    left: ChannelDirection,
    right: ChannelDirection,
    duty: u8,
    pump_on: bool,
    collisions: u32,
    sprayed_ms: u64,
}

impl World{
    pub fn new(width: f32, height: f32, start: Pose, seed: u64) -> Self {
        Self{
            width,
            height,
            obstacles: Vec::new(),
            fires: Vec::new(),
            plumes: Vec::new(),
            ambient_c: 22.0,
            background_gas: 80.0,
            noise: Noise::default(),
            rng: StdRng::seed_from_u64(seed),
            pose: start,
            left: ChannelDirection::Off,
            right: ChannelDirection::Off,
            duty: u8::MAX,
            pump_on: false,
            collisions: 0,
            sprayed_ms: 0,
        }
    }

    pub fn with_obstacle(mut self, center: Vec2, radius: f32) -> Self {
        self.obstacles.push(Circle{center, radius});
        self
    }
    pub fn with_fire(mut self, fire: Fire) -> Self {
        self.fires.push(fire);
        self
    }
    pub fn with_plume(mut self, plume: GasPlume) -> Self {
        self.plumes.push(plume);
        self
    }
    pub fn with_ambient(mut self, celsius: f32) -> Self {
        self.ambient_c = celsius;
        self
    }
    pub fn with_background_gas(mut self, raw: f32) -> Self {
        self.background_gas = raw;
        self
    }
    pub fn with_noise(mut self, noise: Noise) -> Self {
        self.noise = noise;
        self
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }
    pub fn set_pose(&mut self, pose: Pose){
        self.pose = pose;
    }
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
    pub fn obstacles(&self) -> &[Circle] {
        &self.obstacles
    }
    pub fn fires(&self) -> &[Fire] {
        &self.fires
    }
    /// Times a step was refused because the car would have hit something
    pub fn collisions(&self) -> u32 {
        self.collisions
    }
    /// Total time the pump has been on
    pub fn sprayed_ms(&self) -> u64 {
        self.sprayed_ms
    }

    pub fn set_duty(&mut self, duty: u8){
        self.duty = duty;
    }
    pub fn set_channel(&mut self, side: Side, direction: ChannelDirection){
        match side{
            Side::Left => self.left = direction,
            Side::Right => self.right = direction,
        }
    }
    pub fn channels(&self) -> (ChannelDirection, ChannelDirection) {
        (self.left, self.right)
    }
    pub fn set_pump(&mut self, on: bool){
        self.pump_on = on;
    }
    pub fn pump_on(&self) -> bool {
        self.pump_on
    }

    /// Noise free distance seen by a ranger, `None` when nothing is within range
    pub fn range_cm(&self, sensor: RangeSensor) -> Option<f32> {
        let heading = match sensor{
            RangeSensor::Front => self.pose.heading,
            RangeSensor::Side => self.pose.heading - FRAC_PI_2,
        };
        let origin = self.pose.position();
        let dir = Vec2::new(heading.cos(), heading.sin());

        let mut nearest = self.wall_distance(origin, dir);
        for obstacle in &self.obstacles{
            if let Some(t) = ray_circle(origin, dir, obstacle){
                nearest = nearest.min(t);
            }
        }
        if nearest > MAX_RANGE_CM{
            return None;
        }
        Some(nearest)
    }

    /// Round trip echo time the sensor would report, with noise
    pub fn echo_us(&mut self, sensor: RangeSensor) -> Option<u32> {
        let cm = self.range_cm(sensor)?;
        let cm = (cm + jitter(&mut self.rng, self.noise.range_cm)).max(0.0);
        Some((cm * 2.0 / SOUND_CM_PER_US).round() as u32)
    }

    pub fn temperature_c(&self) -> f32 {
        let at = self.pose.position();
        self.ambient_c + self.fires.iter().map(|f| f.intensity * falloff(at, f.center, f.radius)).sum::<f32>()
    }

    /// Gas concentration in raw MQ-2 counts before quantization
    pub fn gas(&self) -> f32 {
        let at = self.pose.position();
        self.background_gas + self.plumes.iter().map(|p| p.concentration * falloff(at, p.center, p.radius)).sum::<f32>()
    }

    /// 10 bit conversion of the analog inputs, with noise
    pub fn analog(&mut self, input: AnalogInput) -> u16 {
        let raw = match input{
            AnalogInput::Temperature => {
                let c = self.temperature_c() + jitter(&mut self.rng, self.noise.temperature_c);
                c / CELSIUS_PER_COUNT
            }
            AnalogInput::Gas => self.gas() + jitter(&mut self.rng, self.noise.gas),
        };
        raw.round().clamp(0.0, ADC_MAX as f32) as u16
    }

    /// Moves the car by what its channels do over `dt_ms` and lets the spray work on fires
    pub fn step(&mut self, dt_ms: u32){
        let dt = dt_ms as f32 / 1000.0;
        let scale = self.duty as f32 / u8::MAX as f32;
        let l = wheel(self.left);
        let r = wheel(self.right);

        let speed = (l + r) / 2.0 * TOP_SPEED_CM_S * scale;
        let spin = (r - l) / 2.0 * TOP_TURN_RAD_S * scale;

        self.pose.heading = wrap_angle(self.pose.heading + spin * dt);
        if speed != 0.0{
            let next = self.pose.position() + self.pose.facing() * speed * dt;
            if self.blocked(next){
                self.collisions += 1;
            }
            else{
                self.pose.x = next.x;
                self.pose.y = next.y;
            }
        }

        if self.pump_on{
            self.sprayed_ms += dt_ms as u64;
            let at = self.pose.position();
            for fire in self.fires.iter_mut(){
                if at.distance(fire.center) < fire.radius{
                    fire.intensity = (fire.intensity - EXTINGUISH_C_PER_S * dt).max(0.0);
                }
            }
        }
    }

    fn blocked(&self, at: Vec2) -> bool {
        if at.x < CAR_RADIUS_CM || at.y < CAR_RADIUS_CM || at.x > self.width - CAR_RADIUS_CM || at.y > self.height - CAR_RADIUS_CM{
            return true;
        }
        self.obstacles.iter().any(|o| at.distance(o.center) < o.radius + CAR_RADIUS_CM)
    }

    fn wall_distance(&self, origin: Vec2, dir: Vec2) -> f32 {
        let tx = if dir.x > f32::EPSILON{
            (self.width - origin.x) / dir.x
        }
        else if dir.x < -f32::EPSILON{
            -origin.x / dir.x
        }
        else{
            f32::INFINITY
        };
        let ty = if dir.y > f32::EPSILON{
            (self.height - origin.y) / dir.y
        }
        else if dir.y < -f32::EPSILON{
            -origin.y / dir.y
        }
        else{
            f32::INFINITY
        };
        tx.min(ty).max(0.0)
    }
}

/// Distance along `dir` to the first point of `circle`, zero from inside it
fn ray_circle(origin: Vec2, dir: Vec2, circle: &Circle) -> Option<f32> {
    let oc = origin - circle.center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - circle.radius * circle.radius;
    if c <= 0.0{
        return Some(0.0);
    }
    let disc = b * b - c;
    if disc < 0.0 || b > 0.0{
        return None;
    }
    Some(-b - disc.sqrt())
}

fn falloff(at: Vec2, center: Vec2, radius: f32) -> f32 {
    if radius <= 0.0{
        return 0.0;
    }
    (1.0 - at.distance(center) / radius).max(0.0)
}

fn wheel(direction: ChannelDirection) -> f32 {
    match direction{
        ChannelDirection::Forward => 1.0,
        ChannelDirection::Reverse => -1.0,
        ChannelDirection::Off => 0.0,
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let tau = std::f32::consts::TAU;
    let a = angle.rem_euclid(tau);
    if a > std::f32::consts::PI{ a - tau } else{ a }
}

fn jitter(rng: &mut StdRng, amplitude: f32) -> f32 {
    if amplitude <= 0.0{
        return 0.0;
    }
    rng.gen_range(-amplitude..=amplitude)
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn ray_hits_circle_front_face(){
        let circle = Circle{center: Vec2::new(50.0, 0.0), radius: 10.0};
        let t = ray_circle(Vec2::ZERO, Vec2::X, &circle);
        assert!((t.unwrap() - 40.0).abs() < 1e-4);
    }

    #[test]
    fn ray_misses_circle_behind(){
        let circle = Circle{center: Vec2::new(-50.0, 0.0), radius: 10.0};
        assert_eq!(ray_circle(Vec2::ZERO, Vec2::X, &circle), None);
    }

    #[test]
    fn angles_wrap_into_half_turns(){
        assert!((wrap_angle(3.0 * std::f32::consts::PI).abs() - std::f32::consts::PI).abs() < 1e-4);
        assert!((wrap_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-4);
    }
}
