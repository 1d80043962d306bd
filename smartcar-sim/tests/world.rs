use glam::Vec2;
use smartcar_core::{
    drive::{channel_pair, ChannelDirection, Side},
    navigation::MovementDirective,
    sensors::{echo_to_cm, AnalogInput, RangeSensor},
};
use smartcar_sim::world::{Fire, GasPlume, Pose, World};

fn room() -> World {
    World::new(200.0, 100.0, Pose::new(50.0, 50.0, 0.0), 1)
}

fn drive(world: &mut World, directive: MovementDirective){
    let (left, right) = channel_pair(directive);
    world.set_channel(Side::Left, left);
    world.set_channel(Side::Right, right);
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.05
}

#[test]
pub fn front_ranger_looks_along_heading(){
    let world = room();
    assert!(close(world.range_cm(RangeSensor::Front).unwrap(), 150.0));
}

#[test]
pub fn side_ranger_looks_right(){
    let world = room();
    assert!(close(world.range_cm(RangeSensor::Side).unwrap(), 50.0));

    let mut world = room();
    world.set_pose(Pose::new(50.0, 30.0, std::f32::consts::PI));
    // facing -x, right hand side is +y
    assert!(close(world.range_cm(RangeSensor::Side).unwrap(), 70.0));
}

#[test]
pub fn echo_converts_back_to_distance(){
    let mut world = room();
    let echo = world.echo_us(RangeSensor::Front).unwrap();
    assert!(close(echo_to_cm(echo), 150.0));
}

#[test]
pub fn nothing_in_reach_gives_no_echo(){
    let mut world = World::new(1000.0, 100.0, Pose::new(50.0, 50.0, 0.0), 1);
    assert_eq!(world.range_cm(RangeSensor::Front), None);
    assert_eq!(world.echo_us(RangeSensor::Front), None);
}

#[test]
pub fn obstacles_shadow_walls(){
    let world = room().with_obstacle(Vec2::new(100.0, 50.0), 10.0);
    assert!(close(world.range_cm(RangeSensor::Front).unwrap(), 40.0));
}

#[test]
pub fn heat_fades_with_distance(){
    let mut world = room()
        .with_ambient(22.0)
        .with_fire(Fire{center: Vec2::new(100.0, 50.0), radius: 100.0, intensity: 40.0});
    assert!(close(world.temperature_c(), 42.0));
    // 42 °C is 86 LM35 counts
    assert_eq!(world.analog(AnalogInput::Temperature), 86);

    world.set_pose(Pose::new(195.0, 95.0, 0.0));
    assert!(close(world.temperature_c(), 22.0));
}

#[test]
pub fn gas_adds_to_background(){
    let mut world = room()
        .with_background_gas(100.0)
        .with_plume(GasPlume{center: Vec2::new(50.0, 50.0), radius: 50.0, concentration: 2000.0});
    assert_eq!(world.analog(AnalogInput::Gas), 1023);
    world.set_pose(Pose::new(85.0, 50.0, 0.0));
    assert_eq!(world.analog(AnalogInput::Gas), 700);
    world.set_pose(Pose::new(150.0, 50.0, 0.0));
    assert_eq!(world.analog(AnalogInput::Gas), 100);
}

#[test]
pub fn both_channels_forward_drive_straight(){
    let mut world = room();
    drive(&mut world, MovementDirective::Forward);
    world.step(1000);
    let pose = world.pose();
    assert!(close(pose.x, 110.0));
    assert!(close(pose.y, 50.0));
}

#[test]
pub fn duty_scales_speed(){
    let mut world = room();
    world.set_duty(51);
    drive(&mut world, MovementDirective::Backward);
    world.step(1000);
    assert!(close(world.pose().x, 38.0));
}

#[test]
pub fn opposite_channels_spin_in_place(){
    let mut world = room();
    drive(&mut world, MovementDirective::TurnRight);
    world.step(200);
    let pose = world.pose();
    assert!(close(pose.x, 50.0) && close(pose.y, 50.0));
    assert!(close(pose.heading, -0.5));

    drive(&mut world, MovementDirective::TurnLeft);
    world.step(200);
    assert!(close(world.pose().heading, 0.0));
}

#[test]
pub fn stopped_car_stays_put(){
    let mut world = room();
    drive(&mut world, MovementDirective::Stop);
    assert_eq!(world.channels(), (ChannelDirection::Off, ChannelDirection::Off));
    world.step(1000);
    assert_eq!(world.pose(), Pose::new(50.0, 50.0, 0.0));
}

#[test]
pub fn walls_stop_the_car(){
    let mut world = room();
    world.set_pose(Pose::new(185.0, 50.0, 0.0));
    drive(&mut world, MovementDirective::Forward);
    world.step(1000);
    assert!(close(world.pose().x, 185.0));
    assert_eq!(world.collisions(), 1);
}

#[test]
pub fn spray_puts_out_fires_in_reach(){
    let mut world = room()
        .with_fire(Fire{center: Vec2::new(100.0, 50.0), radius: 100.0, intensity: 40.0})
        .with_fire(Fire{center: Vec2::new(190.0, 90.0), radius: 20.0, intensity: 40.0});
    world.set_pump(true);
    world.step(1000);
    assert!(close(world.fires()[0].intensity, 34.0));
    assert!(close(world.fires()[1].intensity, 40.0));
    assert_eq!(world.sprayed_ms(), 1000);

    world.step(10_000);
    assert_eq!(world.fires()[0].intensity, 0.0);
}
