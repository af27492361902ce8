use std::collections::HashSet;

use super::*;

/// Best visible creature for a drone to chase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: i32,
    pub pos: Point,
    pub dist: f64,
    pub score: f64,
}

fn score(priority: u32, dist: f64) -> f64 {
    priority as f64 * 1000. / (dist + 1.)
}

/// Picks the visible creature with the highest `priority / distance` score
/// that neither we nor this drone have scanned yet.
///
/// Ties go to the closer creature, then to the lower id. `None` only when
/// every visible creature is already satisfied.
pub fn select_target(drone: &Drone, world: &World, tuning: &Tuning) -> Option<Target> {
    let satisfied: HashSet<i32> = world.me.scans.union(&drone.scans).copied().collect();

    let mut best: Option<Target> = None;

    for (&id, sighting) in &world.visible {
        if satisfied.contains(&id) {
            continue;
        }

        let Some(creature) = world.creature(id) else {
            tracing::warn!(id, "visible creature missing from the catalog");
            continue;
        };
        let priority = tuning.priority(creature.typ);

        let dist = drone.pos.dist(sighting.pos);
        let candidate = Target {
            id,
            pos: sighting.pos,
            dist,
            score: score(priority, dist),
        };

        best = match best {
            Some(b) if candidate.score > b.score => Some(candidate),
            Some(b) if candidate.score == b.score && candidate.dist < b.dist => Some(candidate),
            Some(b) => Some(b),
            None => Some(candidate),
        };
    }

    best
}

/// Illumination pays off only for far targets and a charged battery.
pub fn use_light(drone: &Drone, target: &Target, tuning: &Tuning) -> bool {
    drone.bat > tuning.light_battery && target.dist > tuning.light_distance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(creatures: &[(i32, i8, Point)]) -> World {
        let catalog = creatures
            .iter()
            .map(|&(id, typ, _)| (id, Creature::new(id, 0, typ)))
            .collect();
        let mut world = World::new(catalog);

        let mut turn = TurnState::default();
        for &(id, _, pos) in creatures {
            turn.visible.insert(
                id,
                Sighting {
                    pos,
                    speed: Point::default(),
                },
            );
        }
        world.advance(turn);
        world
    }

    fn drone_at(x: i32, y: i32) -> Drone {
        Drone::new(0, Point::new(x, y), 20, false)
    }

    #[test]
    fn picks_single_candidate() {
        let world = world_with(&[(7, 2, Point::new(5100, 5000))]);
        let target = select_target(&drone_at(5000, 5000), &world, &Tuning::default()).unwrap();

        assert_eq!(target.id, 7);
        assert_eq!(target.pos, Point::new(5100, 5000));
        assert_eq!(target.dist, 100.);
        assert!((target.score - 3000. / 101.).abs() < 1e-9);
    }

    #[test]
    fn priority_outweighs_small_distance_gap() {
        let world = world_with(&[
            (1, 0, Point::new(5200, 5000)),
            (2, 2, Point::new(5300, 5000)),
        ]);
        let target = select_target(&drone_at(5000, 5000), &world, &Tuning::default()).unwrap();
        assert_eq!(target.id, 2);
    }

    #[test]
    fn skips_banked_and_carried_scans() {
        let mut world = world_with(&[
            (1, 2, Point::new(5100, 5000)),
            (2, 2, Point::new(5200, 5000)),
            (3, 0, Point::new(9000, 9000)),
        ]);
        world.me.scans.insert(1);
        let mut drone = drone_at(5000, 5000);
        drone.scans.insert(2);

        let target = select_target(&drone, &world, &Tuning::default()).unwrap();
        assert_eq!(target.id, 3);

        drone.scans.insert(3);
        assert_eq!(select_target(&drone, &world, &Tuning::default()), None);
    }

    #[test]
    fn other_drones_scans_do_not_count() {
        let mut world = world_with(&[(1, 1, Point::new(5100, 5000))]);
        let mut other = Drone::new(1, Point::new(0, 0), 30, false);
        other.scans.insert(1);
        world.me.drones.push(other);

        let target = select_target(&drone_at(5000, 5000), &world, &Tuning::default());
        assert_eq!(target.map(|t| t.id), Some(1));
    }

    #[test]
    fn tie_goes_to_closer_candidate() {
        // 3 * 1000 / 300 == 1 * 1000 / 100
        let world = world_with(&[
            (1, 2, Point::new(5299, 5000)),
            (2, 0, Point::new(5000, 5099)),
        ]);
        let target = select_target(&drone_at(5000, 5000), &world, &Tuning::default()).unwrap();
        assert_eq!(target.id, 2);
        assert_eq!(target.dist, 99.);

        let world = world_with(&[
            (1, 0, Point::new(5000, 5099)),
            (2, 2, Point::new(5299, 5000)),
        ]);
        let target = select_target(&drone_at(5000, 5000), &world, &Tuning::default()).unwrap();
        assert_eq!(target.id, 1);
    }

    #[test]
    fn lone_monster_is_a_zero_score_target() {
        let world = world_with(&[(16, -1, Point::new(5010, 5000))]);
        let target = select_target(&drone_at(5000, 5000), &world, &Tuning::default()).unwrap();
        assert_eq!(target.id, 16);
        assert_eq!(target.score, 0.);
    }

    #[test]
    fn any_fish_outranks_a_monster() {
        let world = world_with(&[
            (1, 0, Point::new(9000, 9000)),
            (16, -1, Point::new(5010, 5000)),
        ]);
        let target = select_target(&drone_at(5000, 5000), &world, &Tuning::default()).unwrap();
        assert_eq!(target.id, 1);
    }

    #[test]
    fn nothing_visible_means_no_target() {
        let world = world_with(&[]);
        assert_eq!(select_target(&drone_at(5000, 5000), &world, &Tuning::default()), None);
    }

    #[test]
    fn light_needs_battery_and_distance() {
        let tuning = Tuning::default();
        let far = Target {
            id: 1,
            pos: Point::new(0, 0),
            dist: 501.,
            score: 1.,
        };
        let near = Target { dist: 500., ..far };

        let mut drone = drone_at(5000, 5000);
        assert!(use_light(&drone, &far, &tuning));
        assert!(!use_light(&drone, &near, &tuning));

        drone.bat = 10;
        assert!(!use_light(&drone, &far, &tuning));
    }
}
