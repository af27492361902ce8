use std::{
    collections::{HashMap, HashSet},
    io::BufRead,
    str::FromStr,
};

use thiserror::Error;

use super::*;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("input ended in the middle of a turn after line {line}")]
    UnexpectedEof { line: usize },
    #[error("line {line}: cannot parse {token:?}")]
    BadToken { line: usize, token: String },
    #[error("line {line}: expected {expected} fields, got {actual}")]
    FieldCount {
        line: usize,
        expected: usize,
        actual: usize,
    },
    #[error("line {line}: unknown radar direction {label:?}")]
    UnknownBlip { line: usize, label: String },
    #[error("line {line}: no drone with id {drone}")]
    UnknownDrone { line: usize, drone: i32 },
}

/// Reads the referee's line protocol.
pub struct InputReader<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(reader: R) -> Self {
        InputReader { reader, line: 0 }
    }

    fn read_line(&mut self) -> Result<Option<String>, InputError> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(buf))
    }

    fn split(&self, line: &str, expected: usize) -> Result<Vec<String>, InputError> {
        let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if fields.len() != expected {
            return Err(InputError::FieldCount {
                line: self.line,
                expected,
                actual: fields.len(),
            });
        }
        Ok(fields)
    }

    fn fields(&mut self, expected: usize) -> Result<Vec<String>, InputError> {
        let line = self
            .read_line()?
            .ok_or(InputError::UnexpectedEof { line: self.line })?;
        self.split(&line, expected)
    }

    fn parse<T: FromStr>(&self, token: &str) -> Result<T, InputError> {
        token.parse().map_err(|_| InputError::BadToken {
            line: self.line,
            token: token.to_string(),
        })
    }

    fn value<T: FromStr>(&mut self) -> Result<T, InputError> {
        let fields = self.fields(1)?;
        self.parse(&fields[0])
    }

    /// Reads the creature catalog sent once before the first turn.
    pub fn read_catalog(&mut self) -> Result<HashMap<i32, Creature>, InputError> {
        let creature_count: usize = self.value()?;
        let mut creatures = HashMap::with_capacity(creature_count);

        for _ in 0..creature_count {
            let inputs = self.fields(3)?;
            let id = self.parse(&inputs[0])?;
            let color = self.parse(&inputs[1])?;
            let typ = self.parse(&inputs[2])?;

            creatures.insert(id, Creature::new(id, color, typ));
        }

        Ok(creatures)
    }

    fn read_scans(&mut self) -> Result<HashSet<i32>, InputError> {
        let count: usize = self.value()?;
        let mut scans = HashSet::with_capacity(count);
        for _ in 0..count {
            scans.insert(self.value()?);
        }
        Ok(scans)
    }

    fn read_drones(&mut self) -> Result<Vec<Drone>, InputError> {
        let count: usize = self.value()?;
        let mut drones = Vec::with_capacity(count);

        for _ in 0..count {
            let inputs = self.fields(5)?;
            let id = self.parse(&inputs[0])?;
            let x = self.parse(&inputs[1])?;
            let y = self.parse(&inputs[2])?;
            let emergency: i32 = self.parse(&inputs[3])?;
            let bat = self.parse(&inputs[4])?;

            drones.push(Drone::new(id, Point::new(x, y), bat, emergency != 0));
        }

        Ok(drones)
    }

    /// Reads one turn. `Ok(None)` means the referee closed the stream
    /// between turns; a blank line there counts as closed too.
    pub fn read_turn(&mut self) -> Result<Option<TurnState>, InputError> {
        let Some(line) = self.read_line()? else {
            return Ok(None);
        };
        if line.trim().is_empty() {
            return Ok(None);
        }
        let fields = self.split(&line, 1)?;

        let mut turn = TurnState::default();
        turn.me.score = self.parse(&fields[0])?;
        turn.opponent.score = self.value()?;

        turn.me.scans = self.read_scans()?;
        turn.opponent.scans = self.read_scans()?;

        turn.me.drones = self.read_drones()?;
        turn.opponent.drones = self.read_drones()?;

        let drone_scan_count: usize = self.value()?;
        for _ in 0..drone_scan_count {
            let inputs = self.fields(2)?;
            let drone_id = self.parse(&inputs[0])?;
            let creature_id = self.parse(&inputs[1])?;

            self.drone_mut(&mut turn, drone_id)?
                .scans
                .insert(creature_id);
        }

        let visible_creature_count: usize = self.value()?;
        for _ in 0..visible_creature_count {
            let inputs = self.fields(5)?;
            let id = self.parse(&inputs[0])?;
            let x = self.parse(&inputs[1])?;
            let y = self.parse(&inputs[2])?;
            let vx = self.parse(&inputs[3])?;
            let vy = self.parse(&inputs[4])?;

            turn.visible.insert(
                id,
                Sighting {
                    pos: Point::new(x, y),
                    speed: Point::new(vx, vy),
                },
            );
        }

        let radar_blip_count: usize = self.value()?;
        for _ in 0..radar_blip_count {
            let inputs = self.fields(3)?;
            let drone_id = self.parse(&inputs[0])?;
            let creature_id = self.parse(&inputs[1])?;
            let dir: BlipDirection =
                inputs[2]
                    .parse()
                    .map_err(|label| InputError::UnknownBlip {
                        line: self.line,
                        label,
                    })?;

            self.drone_mut(&mut turn, drone_id)?
                .blips
                .insert(creature_id, dir);
        }

        Ok(Some(turn))
    }

    fn drone_mut<'a>(
        &self,
        turn: &'a mut TurnState,
        drone_id: i32,
    ) -> Result<&'a mut Drone, InputError> {
        if let Some(drone) = turn.me.drone_mut(drone_id) {
            return Ok(drone);
        }
        turn.opponent
            .drone_mut(drone_id)
            .ok_or(InputError::UnknownDrone {
                line: self.line,
                drone: drone_id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "3\n4 1 0\n5 1 1\n16 -1 -1\n";

    const TURN: &str = "\
12
7
1
4
0
2
0 2000 3500 0 28
2 8000 9700 1 30
1
1 6000 500 0 30
2
0 5
1 4
2
5 2100 5100 -150 0
16 2500 3600 0 -200
2
0 4 TL
2 16 BR
";

    fn reader(text: &str) -> InputReader<&[u8]> {
        InputReader::new(text.as_bytes())
    }

    #[test]
    fn reads_catalog() {
        let creatures = reader(CATALOG).read_catalog().unwrap();
        assert_eq!(creatures.len(), 3);
        assert_eq!(creatures[&5].color, 1);
        assert_eq!(creatures[&5].typ, 1);
        assert!(creatures[&16].is_monster());
        assert_eq!(creatures[&4].pos, None);
    }

    #[test]
    fn reads_full_turn() {
        let turn = reader(TURN).read_turn().unwrap().unwrap();

        assert_eq!(turn.me.score, 12);
        assert_eq!(turn.opponent.score, 7);
        assert_eq!(turn.me.scans, HashSet::from([4]));
        assert!(turn.opponent.scans.is_empty());

        let ids: Vec<i32> = turn.me.drones.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![0, 2]);

        let first = turn.me.drone(0).unwrap();
        assert_eq!(first.pos, Point::new(2000, 3500));
        assert_eq!(first.bat, 28);
        assert!(!first.emergency);
        assert_eq!(first.scans, HashSet::from([5]));
        assert_eq!(first.blips.get(&4), Some(&BlipDirection::TL));

        let second = turn.me.drone(2).unwrap();
        assert!(second.emergency);
        assert_eq!(second.blips.get(&16), Some(&BlipDirection::BR));

        assert_eq!(turn.opponent.drone(1).unwrap().scans, HashSet::from([4]));

        assert_eq!(turn.visible.len(), 2);
        assert_eq!(
            turn.visible[&5],
            Sighting {
                pos: Point::new(2100, 5100),
                speed: Point::new(-150, 0),
            }
        );
    }

    #[test]
    fn closed_stream_ends_game() {
        let mut input = reader(TURN);
        assert!(input.read_turn().unwrap().is_some());
        assert!(input.read_turn().unwrap().is_none());
    }

    #[test]
    fn trailing_blank_line_ends_game() {
        let text = format!("{TURN}\n");
        let mut input = reader(&text);
        assert!(input.read_turn().unwrap().is_some());
        assert!(input.read_turn().unwrap().is_none());

        assert!(reader("  \n").read_turn().unwrap().is_none());
    }

    #[test]
    fn truncated_turn_is_an_error() {
        let err = reader("12\n7\n1\n").read_turn().unwrap_err();
        assert!(matches!(err, InputError::UnexpectedEof { line: 3 }));
    }

    #[test]
    fn garbage_token_is_reported_with_line() {
        let err = reader("12\nseven\n").read_turn().unwrap_err();
        match err {
            InputError::BadToken { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "seven");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn short_lines_are_rejected() {
        let err = reader("1\n4 1\n").read_catalog().unwrap_err();
        assert!(matches!(
            err,
            InputError::FieldCount {
                line: 2,
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn unknown_radar_label() {
        let text = TURN.replace("0 4 TL", "0 4 XX");
        let err = reader(&text).read_turn().unwrap_err();
        assert!(matches!(err, InputError::UnknownBlip { ref label, .. } if label == "XX"));
    }

    #[test]
    fn scan_for_unknown_drone() {
        let text = TURN.replace("1 4\n2\n5", "9 4\n2\n5");
        let err = reader(&text).read_turn().unwrap_err();
        assert!(matches!(err, InputError::UnknownDrone { drone: 9, .. }));
    }
}
