use super::*;

/// Waypoint for a drone that has nothing in sight.
///
/// Shallow drones cross to the other half of the map while diving, deeper
/// ones head back up. No memory is kept between turns.
pub fn explore(pos: Point, tuning: &Tuning) -> Point {
    let waypoint = if pos.y < tuning.shallow_depth {
        let x = if pos.x < MAP_CENTER {
            pos.x + tuning.explore_dx
        } else {
            pos.x - tuning.explore_dx
        };
        Point::new(x, pos.y + tuning.explore_dy)
    } else {
        Point::new(pos.x, pos.y - tuning.explore_dy)
    };

    waypoint.clamp_to_map()
}
