use super::point::Point;

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::{self, Debug},
    str::FromStr,
};

/// Catalog entry for one creature.
///
/// Identity and classification are fixed for the whole game. `pos` and
/// `speed` hold the last observation and stay stale while the creature is out
/// of sight (`None` until it was seen once).
#[derive(Default, Debug, Clone)]
pub struct Creature {
    pub id: i32,
    pub color: i8,
    pub typ: i8,
    pub pos: Option<Point>,
    pub speed: Option<Point>,
}

impl Creature {
    pub fn new(id: i32, color: i8, typ: i8) -> Self {
        Creature {
            id,
            color,
            typ,
            ..Default::default()
        }
    }

    pub fn is_monster(&self) -> bool {
        self.typ == -1
    }
}

/// Fresh observation of a creature during the current turn.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Sighting {
    pub pos: Point,
    pub speed: Point,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlipDirection {
    TL,
    TR,
    BL,
    BR,
}

impl FromStr for BlipDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TL" => Ok(BlipDirection::TL),
            "TR" => Ok(BlipDirection::TR),
            "BL" => Ok(BlipDirection::BL),
            "BR" => Ok(BlipDirection::BR),
            _ => Err(s.to_string()),
        }
    }
}

impl Debug for BlipDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TL => write!(f, "TL"),
            Self::TR => write!(f, "TR"),
            Self::BL => write!(f, "BL"),
            Self::BR => write!(f, "BR"),
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct Drone {
    pub id: i32,
    pub pos: Point,
    pub bat: i32,
    pub emergency: bool,
    /// Scans carried but not yet banked.
    pub scans: HashSet<i32>,
    /// Radar hints for creatures, keyed by creature id.
    pub blips: HashMap<i32, BlipDirection>,
}

impl Drone {
    pub fn new(id: i32, pos: Point, bat: i32, emergency: bool) -> Self {
        Drone {
            id,
            pos,
            bat,
            emergency,
            ..Default::default()
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct Player {
    pub score: i32,
    /// Scans already credited to the score.
    pub scans: HashSet<i32>,
    /// Drones in feed order; commands are emitted in this order.
    pub drones: Vec<Drone>,
}

impl Player {
    pub fn drone(&self, id: i32) -> Option<&Drone> {
        self.drones.iter().find(|d| d.id == id)
    }

    pub fn drone_mut(&mut self, id: i32) -> Option<&mut Drone> {
        self.drones.iter_mut().find(|d| d.id == id)
    }
}

/// Everything the referee reports for a single turn.
#[derive(Default, Debug, Clone)]
pub struct TurnState {
    pub me: Player,
    pub opponent: Player,
    pub visible: BTreeMap<i32, Sighting>,
}

/// Fixed creature catalog plus the state of the current turn.
#[derive(Default, Debug)]
pub struct World {
    pub creatures: HashMap<i32, Creature>,
    pub me: Player,
    pub opponent: Player,
    /// Creatures visible this turn, ordered by id.
    pub visible: BTreeMap<i32, Sighting>,
    pub iter: i32,
}

impl World {
    pub fn new(creatures: HashMap<i32, Creature>) -> Self {
        World {
            creatures,
            ..Default::default()
        }
    }

    /// Replaces all per-turn state with `turn` and refreshes the cached
    /// position of every creature seen this turn.
    pub fn advance(&mut self, turn: TurnState) {
        let TurnState {
            me,
            opponent,
            visible,
        } = turn;

        for (id, sighting) in &visible {
            match self.creatures.get_mut(id) {
                Some(creature) => {
                    creature.pos = Some(sighting.pos);
                    creature.speed = Some(sighting.speed);
                }
                None => tracing::warn!(id, "sighting of a creature missing from the catalog"),
            }
        }

        self.me = me;
        self.opponent = opponent;
        self.visible = visible;
        self.iter += 1;
    }

    pub fn creature(&self, id: i32) -> Option<&Creature> {
        self.creatures.get(&id)
    }
}
