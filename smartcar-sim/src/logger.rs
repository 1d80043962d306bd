use log::{error, info, warn};
use smartcar_core::event::{Event, EventSink, Level};

/// Counts of the events that never make it into a cycle record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventTally{
    pub faults: u32,
    pub ranger_timeouts: u32,
    pub sprays_suppressed: u32,
}

/// Forwards controller events to the `log` facade
#[derive(Default)]
pub struct LogSink{
    tally: EventTally,
}

impl LogSink{
    pub fn tally(&self) -> EventTally {
        self.tally
    }
}

impl EventSink for LogSink{
    fn record(&mut self, event: Event){
        match event{
            Event::Fault(_) => self.tally.faults += 1,
            Event::RangerTimeout(_) => self.tally.ranger_timeouts += 1,
            Event::SpraySuppressed => self.tally.sprays_suppressed += 1,
            _ => {}
        }
        match event.level(){
            Level::Info => info!("{}", event),
            Level::Warn => warn!("{}", event),
            Level::Error => error!("{}", event),
        }
    }
}
