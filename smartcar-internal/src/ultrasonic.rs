use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::{clock::Clock, ECHO_TIMEOUT_US};

/// HC-SR04 with its trigger and echo lines on two GPIOs
pub struct HcSr04<Trig: OutputPin, Echo: InputPin>{
    trig: Trig,
    echo: Echo,
}

impl<Trig: OutputPin, Echo: InputPin> HcSr04<Trig, Echo>{
    pub fn new(mut trig: Trig, echo: Echo) -> Self {
        let _ = trig.set_low();
        Self{
            trig,
            echo,
        }
    }

    /// Fires one 10us trigger pulse and times the echo's high phase.
    /// `None` if the echo does not rise, or does not fall, within [ECHO_TIMEOUT_US].
    pub fn echo_us(&mut self, clock: &Clock) -> Option<u32> {
        let _ = self.trig.set_low();
        arduino_hal::delay_us(2);
        let _ = self.trig.set_high();
        arduino_hal::delay_us(10);
        let _ = self.trig.set_low();

        let armed = clock.micros();
        while !self.echo_high(){
            if clock.micros().wrapping_sub(armed) > ECHO_TIMEOUT_US{
                return None;
            }
        }
        let rise = clock.micros();
        while self.echo_high(){
            if clock.micros().wrapping_sub(rise) > ECHO_TIMEOUT_US{
                return None;
            }
        }
        Some(clock.micros().wrapping_sub(rise))
    }

    fn echo_high(&self) -> bool {
        matches!(self.echo.is_high(), Ok(true))
    }

    pub fn release(self) -> (Trig, Echo) {
        (self.trig, self.echo)
    }
}
