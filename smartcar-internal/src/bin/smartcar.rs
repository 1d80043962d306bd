#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use panic_halt as _;
use smartcar_core::{
    config::Config,
    control::Controller,
    drive::{DriveTrain, HBridgeChannel, PumpSwitch, Side},
};
use smartcar_internal::{
    board::Board,
    clock::Clock,
    pwm::EnablePwm,
    serial_log::SerialSink,
    ultrasonic::HcSr04,
    SERIAL_BAUD,
};

#[arduino_hal::entry]
fn main() -> ! {
    let peripherals = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(peripherals);
    let serial = arduino_hal::default_serial!(peripherals, pins, SERIAL_BAUD);
    let config = Config::DEFAULT;

    let clock = Clock::start(peripherals.TC0);
    unsafe { avr_device::interrupt::enable() };

    let mut adc = arduino_hal::Adc::new(peripherals.ADC, Default::default());
    let temperature = pins.a0.into_analog_input(&mut adc).into_channel();
    let gas = pins.a1.into_analog_input(&mut adc).into_channel();

    let board = Board{
        front: HcSr04::new(pins.d2.into_output().downgrade(), pins.d3.into_floating_input().downgrade()),
        side: HcSr04::new(pins.d4.into_output().downgrade(), pins.d5.into_floating_input().downgrade()),
        adc,
        temperature,
        gas,
        clock,
    };

    let left = HBridgeChannel::new(Side::Left, pins.d6.into_output().downgrade(), pins.d7.into_output().downgrade());
    let right = HBridgeChannel::new(Side::Right, pins.d8.into_output().downgrade(), pins.d9.into_output().downgrade());
    // the timers drive these once the pins are outputs
    let _enable_left = pins.d10.into_output();
    let _enable_right = pins.d11.into_output();
    let _pwm = EnablePwm::start(peripherals.TC1, peripherals.TC2, config.motor_speed);
    let pump = PumpSwitch::new(pins.d12.into_output().downgrade());

    let mut sink = SerialSink::new(serial);
    let mut car = Controller::new(board, DriveTrain::new(left, right), pump, config);
    let now = car.sensors_mut().millis();
    car.start(now, &mut sink);

    loop{
        let now = car.sensors_mut().millis();
        car.tick(now, &mut sink);
    }
}
