use std::fmt;

use super::*;

/// What a drone decided to do this turn, before movement limits apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Emergency: straight up to the surface, nothing else matters.
    Surface,
    Pursue { target: Target, light: bool },
    Explore { waypoint: Point },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub pos: Point,
    pub light: bool,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let light = if self.light { 1 } else { 0 };
        write!(f, "MOVE {} {} {}", self.pos.x, self.pos.y, light)
    }
}

fn unstick_axis(v: i32, tuning: &Tuning) -> i32 {
    if v <= tuning.edge_margin {
        tuning.edge_snap_low
    } else if v >= MAP_SIZE - tuning.edge_margin {
        tuning.edge_snap_high
    } else {
        v
    }
}

/// Pulls a move that lands next to a border back into the playfield,
/// each axis on its own.
pub fn unstick(pos: Point, tuning: &Tuning) -> Point {
    Point::new(unstick_axis(pos.x, tuning), unstick_axis(pos.y, tuning))
}

/// Turns a decision into the command actually sent for a drone at `pos`.
pub fn plan(pos: Point, decision: &Decision, tuning: &Tuning) -> Command {
    let (waypoint, light) = match *decision {
        Decision::Surface => {
            return Command {
                pos: Point::new(pos.x, 0),
                light: false,
            }
        }
        Decision::Pursue { target, light } => (target.pos, light),
        Decision::Explore { waypoint } => (waypoint, false),
    };

    let next = pos.step_toward(waypoint, tuning.max_step);

    Command {
        pos: unstick(next, tuning),
        light,
    }
}
