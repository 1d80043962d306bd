//! Cycle records, the on-disk recording format and run summaries.
//!
//! A recording is a flat sequence of frames, each a little endian `u32` length
//! followed by that many bytes of a bincode encoded [CycleRecord].

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};
use smartcar_core::{
    control::CycleReport,
    navigation::{Movement, MovementDirective},
};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::{error::SimError, logger::EventTally, world::Pose};

const FRAME_HEADER:usize = 4;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CycleRecord{
    pub report: CycleReport,
    /// Where the car was when the cycle read its sensors
    pub pose: Pose,
    pub pump_on: bool,
    pub collisions: u32,
}

pub fn encode_frame(record: &CycleRecord) -> Result<Vec<u8>, SimError> {
    let body = bincode::serialize(record)?;
    let mut frame = Vec::with_capacity(FRAME_HEADER + body.len());
    frame.extend_from_slice(&(body.len() as u32).to_le_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

pub fn decode_frames(bytes: &[u8]) -> Result<Vec<CycleRecord>, SimError> {
    let mut records = Vec::new();
    let mut offset = 0;
    while offset < bytes.len(){
        let header = bytes.get(offset..offset + FRAME_HEADER).ok_or(SimError::Truncated{ offset })?;
        let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let start = offset + FRAME_HEADER;
        let body = bytes.get(start..start + len).ok_or(SimError::Truncated{ offset })?;
        records.push(bincode::deserialize(body)?);
        offset = start + len;
    }
    Ok(records)
}

/// Writes every record received on `rx` to `path` until all senders are dropped.
/// Returns the number of records written.
pub async fn record_to(path: impl AsRef<Path>, rx: flume::Receiver<CycleRecord>) -> Result<u64, SimError> {
    let file = tokio::fs::File::create(path).await?;
    let mut out = BufWriter::new(file);
    let mut written = 0;
    while let Ok(record) = rx.recv_async().await{
        out.write_all(&encode_frame(&record)?).await?;
        written += 1;
    }
    out.flush().await?;
    Ok(written)
}

pub async fn read_recording(path: impl AsRef<Path>) -> Result<Vec<CycleRecord>, SimError> {
    let bytes = tokio::fs::read(path).await?;
    decode_frames(&bytes)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectiveCounts{
    pub forward: u32,
    pub backward: u32,
    pub turn_left: u32,
    pub turn_right: u32,
    pub stop: u32,
}

impl DirectiveCounts{
    fn add(&mut self, directive: MovementDirective){
        match directive{
            MovementDirective::Forward => self.forward += 1,
            MovementDirective::Backward => self.backward += 1,
            MovementDirective::TurnLeft => self.turn_left += 1,
            MovementDirective::TurnRight => self.turn_right += 1,
            MovementDirective::Stop => self.stop += 1,
        }
    }
}

/// What a run did, built from its cycle records
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary{
    pub cycles: u32,
    pub heat_hazards: u32,
    pub gas_hazards: u32,
    pub sprays: u32,
    /// Back up and turn sequences
    pub maneuvers: u32,
    pub directives: DirectiveCounts,
    pub events: EventTally,
    pub collisions: u32,
    pub final_pose: Option<Pose>,
}

impl Summary{
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a CycleRecord>) -> Self {
        let mut summary = Self::default();
        for record in records{
            summary.add(record);
        }
        summary
    }

    pub fn add(&mut self, record: &CycleRecord){
        let report = &record.report;
        self.cycles += 1;
        if report.hazard.high_temperature{
            self.heat_hazards += 1;
        }
        if report.hazard.harmful_gas{
            self.gas_hazards += 1;
        }
        if report.sprayed{
            self.sprays += 1;
        }
        if let Movement::BackUpAndTurn{..} = report.movement{
            self.maneuvers += 1;
        }
        for directive in report.movement.directives(){
            self.directives.add(directive);
        }
        self.collisions = record.collisions;
        self.final_pose = Some(record.pose);
    }

    pub fn absorb(&mut self, tally: EventTally){
        self.events = tally;
    }
}

impl fmt::Display for Summary{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.directives;
        writeln!(f, "cycles: {}", self.cycles)?;
        writeln!(f, "hazards: {} heat, {} gas", self.heat_hazards, self.gas_hazards)?;
        writeln!(f, "sprays: {} ({} suppressed)", self.sprays, self.events.sprays_suppressed)?;
        writeln!(
            f,
            "directives: forward {} backward {} right {} left {} stop {}",
            d.forward, d.backward, d.turn_right, d.turn_left, d.stop
        )?;
        writeln!(f, "back up maneuvers: {}", self.maneuvers)?;
        writeln!(f, "ranger timeouts: {} faults: {} collisions: {}", self.events.ranger_timeouts, self.events.faults, self.collisions)?;
        if let Some(pose) = self.final_pose{
            write!(f, "final pose: ({:.1}, {:.1}) heading {:.0}°", pose.x, pose.y, pose.heading.to_degrees())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use smartcar_core::{hazard::HazardStatus, sensors::SensorSnapshot};

    fn record(cycle: u32) -> CycleRecord {
        CycleRecord{
            report: CycleReport{
                cycle,
                at_ms: cycle * 100,
                snapshot: SensorSnapshot::measured(30.0, 30.0, 25.0, 100),
                hazard: HazardStatus::CLEAR,
                movement: Movement::Drive(MovementDirective::Forward),
                sprayed: false,
            },
            pose: Pose::new(10.0, 20.0, 0.0),
            pump_on: false,
            collisions: 0,
        }
    }

    #[test]
    fn cut_frame_is_reported_with_its_offset(){
        let mut bytes = encode_frame(&record(1)).unwrap();
        let first = bytes.len();
        bytes.extend(encode_frame(&record(2)).unwrap());
        bytes.truncate(bytes.len() - 3);
        match decode_frames(&bytes){
            Err(SimError::Truncated{ offset }) => assert_eq!(offset, first),
            other => panic!("expected truncation, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn empty_recording_has_no_records(){
        assert!(decode_frames(&[]).unwrap().is_empty());
    }
}
