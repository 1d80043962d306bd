use arduino_hal::pac::{TC1, TC2};

/// WGM13:12 and WGM11:10 for 8 bit fast PWM (mode 5, TOP = 0xFF)
const TC1_FAST_PWM_8BIT: (u8, u8) = (0b01, 0b01);
/// COM1B: clear OC1B on compare match, set at BOTTOM
const TC1_OC1B_NON_INVERTING: u8 = 0b10;
/// CS1: clk/64, roughly 980Hz at 8 bits
const TC1_PRESCALE_64: u8 = 0b011;

/// Drives the enable inputs of both motor channels with the same duty.
///
/// Left enable is `D10` (timer 1, OC1B), right enable is `D11` (timer 2, OC2A).
/// Both pins have to be outputs before the timers take them over.
pub struct EnablePwm{
    tc1: TC1,
    tc2: TC2,
}

impl EnablePwm{
    pub fn start(tc1: TC1, tc2: TC2, duty: u8) -> EnablePwm {
        let (wgm_hi, wgm_lo) = TC1_FAST_PWM_8BIT;
        // Ensure timer is stopped
        tc1.tccr1b.modify(|_,w| w.cs1().no_clock());
        tc1.tcnt1.reset();
        tc1.tccr1a.modify(|_,w| w.wgm1().bits(wgm_lo));
        tc1.tccr1b.modify(|_,w| w.wgm1().bits(wgm_hi));
        tc1.tccr1a.modify(|_,w| w.com1b().bits(TC1_OC1B_NON_INVERTING));

        tc2.tccr2b.modify(|_,w| w.cs2().no_clock());
        tc2.tccr2a.modify(|_,w| w.wgm2().pwm_fast().com2a().match_clear());

        let pwm = EnablePwm{
            tc1,
            tc2,
        };
        pwm.set_duty(duty);
        pwm.tc1.tccr1b.modify(|_,w| w.cs1().bits(TC1_PRESCALE_64));
        pwm.tc2.tccr2b.modify(|_,w| w.cs2().prescale_64());
        pwm
    }

    /// Duty out of 255 on both enables
    pub fn set_duty(&self, duty: u8){
        self.tc1.ocr1b.write(|w| w.bits(duty as u16));
        self.tc2.ocr2a.write(|w| unsafe { w.bits(duty) });
    }

    pub fn dissolve(self) -> (TC1, TC2) {
        self.tc1.tccr1b.modify(|_,w| w.cs1().no_clock());
        self.tc1.tccr1a.modify(|_,w| w.com1b().disconnected());
        self.tc2.tccr2b.modify(|_,w| w.cs2().no_clock());
        self.tc2.tccr2a.modify(|_,w| w.com2a().disconnected());
        (self.tc1, self.tc2)
    }
}
