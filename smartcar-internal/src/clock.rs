use core::cell::Cell;

use arduino_hal::pac::TC0;
use avr_device::interrupt::Mutex;

/// Timer 0 counts at 16MHz / 64, one tick every 4us
const PRESCALE: u32 = 64;
/// Compare match every 250 ticks, once per millisecond
const TIMER_COUNTS: u8 = 249;
const US_PER_TICK: u32 = PRESCALE / 16;

static MILLIS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA(){
    avr_device::interrupt::free(|cs| {
        let millis = MILLIS.borrow(cs);
        millis.set(millis.get().wrapping_add(1));
    })
}

/// Free running clock. Both counters wrap, compare them with `wrapping_sub`.
pub struct Clock{
    timer: TC0,
}

impl Clock{
    /// Starts the timer. Interrupts still have to be enabled globally afterwards.
    pub fn start(timer: TC0) -> Clock {
        timer.tccr0a.write(|w| w.wgm0().ctc());
        timer.ocr0a.write(|w| w.bits(TIMER_COUNTS));
        timer.tccr0b.write(|w| w.cs0().prescale_64());
        timer.timsk0.write(|w| w.ocie0a().set_bit());
        avr_device::interrupt::free(|cs| MILLIS.borrow(cs).set(0));

        Clock{
            timer,
        }
    }

    pub fn millis(&self) -> u32 {
        avr_device::interrupt::free(|cs| MILLIS.borrow(cs).get())
    }

    /// Microseconds with 4us resolution
    pub fn micros(&self) -> u32 {
        avr_device::interrupt::free(|cs| {
            let mut ms = MILLIS.borrow(cs).get();
            let ticks = self.timer.tcnt0.read().bits();
            // the counter already rolled over but the interrupt has not run yet
            if self.timer.tifr0.read().ocf0a().bit_is_set() && ticks < TIMER_COUNTS{
                ms = ms.wrapping_add(1);
            }
            ms.wrapping_mul(1000).wrapping_add(ticks as u32 * US_PER_TICK)
        })
    }

    pub fn dissolve(self) -> TC0 {
        self.timer.tccr0b.write(|w| w.cs0().no_clock());
        self.timer.timsk0.write(|w| w.ocie0a().clear_bit());
        self.timer
    }
}
