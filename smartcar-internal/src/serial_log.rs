use smartcar_core::{
    event::{Event, EventSink, Hundredths},
    sensors::Range,
};
use ufmt::{uDisplay, uWrite, uwrite, uwriteln, Formatter};

/// Two decimal rendering of a float, `ufmt` cannot print them
pub struct Fixed2(pub f32);

impl uDisplay for Fixed2{
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let h = Hundredths::new(self.0);
        let sign = if h.negative { "-" } else { "" };
        uwrite!(f, "{}{}.{}{}", sign, h.whole, h.fraction / 10, h.fraction % 10)
    }
}

struct Distance(Range);

impl uDisplay for Distance{
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self.0{
            Range::Measured(cm) => uwrite!(f, "{} cm", Fixed2(cm)),
            Range::NoEcho => f.write_str("no echo"),
        }
    }
}

/// Writes one line per event to the serial port, write errors are dropped
pub struct SerialSink<W: uWrite>{
    serial: W,
}

impl<W: uWrite> SerialSink<W>{
    pub fn new(serial: W) -> Self {
        Self{
            serial,
        }
    }
    pub fn release(self) -> W {
        self.serial
    }
}

impl<W: uWrite> EventSink for SerialSink<W>{
    fn record(&mut self, event: Event){
        match (event, event.message()){
            (Event::Readings(s), _) => {
                let _ = uwriteln!(
                    &mut self.serial,
                    "Front Distance: {} | Side Distance: {} | Temperature: {} °C | Gas Level: {}",
                    Distance(s.front),
                    Distance(s.side),
                    Fixed2(s.temperature_c),
                    s.gas_level
                );
            }
            (_, Some(msg)) => {
                let _ = uwriteln!(&mut self.serial, "{}", msg);
            }
            (_, None) => {}
        }
    }
}
