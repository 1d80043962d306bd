//! Obstacle avoidance for the hazard free case.
//!
//! The policy only ever turns right. [MovementDirective::TurnLeft] is wired all the way
//! through the drive train but no rule selects it yet.

use serde::{Deserialize, Serialize};

use crate::{
    config::{Thresholds, Timing},
    sensors::{Range, SensorSnapshot},
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementDirective{
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Stop,
}

/// A directive that must be held for a fixed time before the next one
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldDirective{
    pub directive: MovementDirective,
    pub hold_ms: u32,
}

/// What the policy wants the drive train to do this cycle
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement{
    /// Applied once, the car keeps doing it until the next cycle
    Drive(MovementDirective),
    /// Boxed in: reverse, then swing right, each held for its own duration
    BackUpAndTurn{
        backup: HeldDirective,
        turn: HeldDirective,
    },
}

impl Movement{
    /// The directives in the order they reach the motors
    pub fn directives(&self) -> impl Iterator<Item = MovementDirective> {
        let (first, second) = match *self{
            Movement::Drive(d) => (d, None),
            Movement::BackUpAndTurn{ backup, turn } => (backup.directive, Some(turn.directive)),
        };
        core::iter::once(first).chain(second)
    }
}

/// Path ahead is open when measured at or beyond the safe distance
pub fn front_clear(front: Range, thresholds: &Thresholds) -> bool {
    match front{
        Range::Measured(cm) => cm >= thresholds.safe_distance_cm,
        Range::NoEcho => false,
    }
}

/// The side must be strictly beyond the safe distance to turn into it
pub fn side_open(side: Range, thresholds: &Thresholds) -> bool {
    match side{
        Range::Measured(cm) => cm > thresholds.safe_distance_cm,
        Range::NoEcho => false,
    }
}

/// First matching rule wins: forward, turn right, back up and turn
pub fn decide_movement(snapshot: &SensorSnapshot, thresholds: &Thresholds, timing: &Timing) -> Movement {
    if front_clear(snapshot.front, thresholds){
        return Movement::Drive(MovementDirective::Forward);
    }
    if side_open(snapshot.side, thresholds){
        return Movement::Drive(MovementDirective::TurnRight);
    }
    Movement::BackUpAndTurn{
        backup: HeldDirective{ directive: MovementDirective::Backward, hold_ms: timing.backup_ms },
        turn: HeldDirective{ directive: MovementDirective::TurnRight, hold_ms: timing.turn_ms },
    }
}
